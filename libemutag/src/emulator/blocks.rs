// libemutag/src/emulator/blocks.rs

//! Type-2 tag served from a block image.

use crate::emulator::handler::{FrameHandler, Reply};
use crate::protocol::BlockCommand;
use crate::store::BlockMemory;
use crate::types::{Exchange, Termination};
use crate::Result;
use log::debug;

/// Raw Type-2 dispatch: READ serves four blocks, HALT ends the session and
/// anything else is unsupported.
pub struct BlockHandler<'a> {
    memory: &'a BlockMemory,
}

impl<'a> BlockHandler<'a> {
    /// Serve reads from `memory`.
    pub fn new(memory: &'a BlockMemory) -> Self {
        Self { memory }
    }
}

impl FrameHandler for BlockHandler<'_> {
    fn handle(&mut self, frame: &[u8]) -> Result<Reply> {
        let reply = match BlockCommand::decode(frame) {
            BlockCommand::Read { block } => Reply::respond(self.memory.read(block).to_vec()),
            BlockCommand::Halt => {
                debug!("initiator sent HALT");
                Reply::stop_with(Vec::new(), Termination::InitiatorHalted)
            }
            BlockCommand::Unsupported { code } => {
                debug!("unsupported block command {:02x?}", code);
                Reply::stop_with(Vec::new(), Termination::UnsupportedCommand)
            }
        };
        Ok(reply)
    }

    fn exchange(&self) -> Exchange {
        Exchange::Raw
    }
}
