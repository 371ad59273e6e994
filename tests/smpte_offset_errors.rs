use pretty_assertions::assert_eq;
use smfcodec::prelude::*;

/// Raw SMPTE offset payload
fn payload(rate_bits: u8, hour: u8, minute: u8, second: u8, frame: u8, subframe: u8) -> [u8; 5] {
    [(rate_bits << 5) | (hour & 0x1F), minute, second, frame, subframe]
}

#[test]
fn wrong_payload_length() {
    for len in [0, 3, 4, 6] {
        let data = vec![0x00; len];
        assert_eq!(SmpteOffset::parse(&data), Err(SmpteError::Length(len)));
    }
}

#[test]
fn rate_bits_out_of_range() {
    for bits in 4..=7 {
        let data = payload(bits, 12, 30, 15, 10, 50);
        assert_eq!(SmpteOffset::parse(&data), Err(SmpteError::TrackFrame(bits)));
    }
}

#[test]
fn fields_out_of_range() {
    let cases = [
        (payload(0, 24, 0, 0, 0, 0), SmpteError::HourOffset(24)),
        (payload(0, 31, 0, 0, 0, 0), SmpteError::HourOffset(31)),
        (payload(0, 12, 60, 30, 15, 50), SmpteError::MinuteOffset(60)),
        (payload(1, 12, 255, 30, 15, 50), SmpteError::MinuteOffset(255)),
        (payload(1, 12, 30, 60, 15, 50), SmpteError::SecondOffset(60)),
        (payload(2, 12, 30, 45, 15, 100), SmpteError::Subframe(100)),
        (payload(3, 12, 30, 45, 15, 255), SmpteError::Subframe(255)),
    ];
    for (data, expected) in cases {
        assert_eq!(SmpteOffset::parse(&data), Err(expected), "{data:?}");
    }
}

#[test]
fn first_invalid_field_wins() {
    let data = payload(0, 25, 61, 30, 15, 50);
    assert_eq!(SmpteOffset::parse(&data), Err(SmpteError::HourOffset(25)));

    let data = payload(1, 23, 60, 60, 15, 50);
    assert_eq!(SmpteOffset::parse(&data), Err(SmpteError::MinuteOffset(60)));
}

#[test]
fn limits_are_inclusive() {
    for (bits, frame) in [(0, 23), (1, 24), (2, 29), (3, 29)] {
        let data = payload(bits, 23, 59, 59, frame, 99);
        let offset = SmpteOffset::parse(&data).unwrap();

        assert_eq!(offset.fps.offset_bits(), bits);
        assert_eq!(
            (offset.hour, offset.minute, offset.second),
            (23, 59, 59)
        );
        assert_eq!(offset.frame, frame);
        assert_eq!(offset.subframe, 99);
        assert_eq!(offset.to_bytes(), data);
    }
}

#[test]
fn frames_are_not_range_checked() {
    let data = payload(0, 0, 0, 0, 24, 0);
    assert_eq!(SmpteOffset::parse(&data).map(|o| o.frame), Ok(24));
}

#[test]
fn rate_and_hour_bits_do_not_overlap() {
    for bits in 0..=3 {
        for hour in 0..=23 {
            let offset = SmpteOffset::parse(&payload(bits, hour, 30, 45, 15, 50)).unwrap();
            assert_eq!(offset.fps, SmpteFps::from_offset_bits(bits).unwrap());
            assert_eq!(offset.hour, hour);
        }
    }
}

#[test]
fn midnight_is_zero() {
    let offset = SmpteOffset::parse(&payload(1, 0, 0, 0, 0, 0)).unwrap();
    assert_eq!(offset.as_micros(), 0.);

    let last = SmpteOffset::parse(&payload(0, 23, 59, 59, 23, 99)).unwrap();
    let expected = 86_399_000_000. + (23. / 24.) * 1_000_000. + (0.99 / 24.) * 1_000_000.;
    assert!((last.as_micros() - expected).abs() < 1.);
}

#[test]
fn invalid_header_frame_rate() {
    let header = HeaderChunk::new(0, 1, 0xE628);
    assert_eq!(
        header.timing(),
        Err(ParseError::Smpte(SmpteError::HeaderFrameTime(-26)))
    );
}
