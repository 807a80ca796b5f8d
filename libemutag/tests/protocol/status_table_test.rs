use libemutag::protocol::{Outcome, ResponseFrame, StatusWord, status_word_for};

#[test]
fn table_is_fixed() {
    let table = [
        (Outcome::CommandComplete, [0x90, 0x00]),
        (Outcome::TagNotFound, [0x6A, 0x82]),
        (Outcome::FunctionNotSupported, [0x6A, 0x81]),
        (Outcome::MemoryFailure, [0x65, 0x81]),
        (Outcome::EndOfFileBeforeReachedLength, [0x62, 0x82]),
    ];
    for (outcome, bytes) in table {
        assert_eq!(status_word_for(outcome).to_bytes(), bytes, "{}", outcome);
        assert_eq!(StatusWord::new(bytes[0], bytes[1]).outcome(), Some(outcome));
    }
    assert_eq!(StatusWord::new(0x6D, 0x00).outcome(), None);
}

#[test]
fn response_frame_appends_status_after_content() {
    let mut resp = ResponseFrame::with_capacity(8);
    resp.extend_from_slice(&[0x00, 0x05]).unwrap();
    resp.push_status(Outcome::CommandComplete.status_word()).unwrap();
    assert_eq!(resp.as_bytes(), &[0x00, 0x05, 0x90, 0x00]);
    assert_eq!(
        StatusWord::from_response(resp.as_bytes()).map(|sw| sw.to_string()),
        Some("9000".to_string())
    );

    // a failed outcome drops any content
    resp.set_outcome(Outcome::TagNotFound).unwrap();
    assert_eq!(resp.as_bytes(), &[0x6A, 0x82]);
}
