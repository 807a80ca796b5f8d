use libemutag::Error;
use libemutag::test_support::scripted_target;
use libemutag::transport::{MockTarget, TargetTransport};
use libemutag::types::{Exchange, TargetDescriptor};

#[test]
fn scripted_target_plays_initiator() {
    let mut t = scripted_target(vec![vec![0x30, 0x00], vec![0x50, 0x00]]);
    let d = TargetDescriptor::new(Exchange::Raw);
    t.precondition().unwrap();
    assert_eq!(t.init_as_target(&d, 100).unwrap(), vec![0x30, 0x00]);
    assert_eq!(t.receive_command(100).unwrap(), vec![0x50, 0x00]);
    assert!(matches!(t.receive_command(100), Err(Error::Timeout)));
    t.release().unwrap();
    assert_eq!(t.descriptors, vec![d]);
}

#[test]
fn boxed_target_through_mut_ref() {
    let mut boxed: Box<MockTarget> = Box::new(MockTarget::new(None));
    let t: &mut dyn TargetTransport = boxed.as_mut();
    assert!(t
        .init_as_target(&TargetDescriptor::new(Exchange::Apdu), 10)
        .is_err());
    assert_eq!(boxed.descriptors.len(), 1);
}
