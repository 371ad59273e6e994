use pretty_assertions::assert_eq;
use smfcodec::prelude::*;

/// Wraps `body` in a format 0 file, declaring `declared` bytes for the track
fn file_with_track(declared: u32, body: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"MThd");
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x06, 0x00, 0x00, 0x00, 0x01, 0x00, 0x60]);
    bytes.extend_from_slice(b"MTrk");
    bytes.extend_from_slice(&declared.to_be_bytes());
    bytes.extend_from_slice(body);
    bytes
}

const BODY_START: usize = 22;

#[test]
fn unknown_status_inside_track() {
    let body = [0x00, 0x90, 0x3C, 0x40, 0x00, 0xF5, 0x00];
    let err = MidiFile::parse(&file_with_track(body.len() as u32, &body)).unwrap_err();

    assert_eq!(err.parse_error(), Some(&ParseError::UnknownEventTag(0xF5)));
    assert_eq!(err.component(), Component::Event);
    assert_eq!(err.position(), BODY_START + 5);
}

#[test]
fn unknown_meta_type() {
    let body = [0x00, 0xFF, 0x60, 0x00];
    let err = MidiFile::parse(&file_with_track(4, &body)).unwrap_err();

    assert_eq!(
        err.parse_error(),
        Some(&ParseError::UnknownEventType {
            family: EventFamily::Meta,
            tag: 0x60
        })
    );
    assert_eq!(err.position(), BODY_START + 1);
}

#[test]
fn meta_payload_past_input() {
    let err = MetaEvent::parse(&[0xFF, 0x01, 0x10, b'h', b'i']).unwrap_err();
    assert_eq!(
        err.parse_error(),
        Some(&ParseError::TruncatedMetaPayload {
            declared: 16,
            available: 2
        })
    );

    // inside a track the same payload overruns the chunk
    let body = [0x00, 0xFF, 0x01, 0x10, b'h', b'i'];
    let err = MidiFile::parse(&file_with_track(6, &body)).unwrap_err();
    assert_eq!(
        err.parse_error(),
        Some(&ParseError::TrackChunkOverrun {
            declared: 6,
            offset: 0
        })
    );
    assert_eq!(err.position(), BODY_START);
}

#[test]
fn event_overruns_declared_length() {
    // the note off is 4 bytes, but only 2 of them are inside the chunk
    let body = [0x00, 0x90, 0x3C, 0x40, 0x00, 0x80, 0x3C, 0x40];
    let err = MidiFile::parse(&file_with_track(6, &body)).unwrap_err();

    assert_eq!(
        err.parse_error(),
        Some(&ParseError::TrackChunkOverrun {
            declared: 6,
            offset: 4
        })
    );
    assert_eq!(err.component(), Component::Chunk);
    assert_eq!(err.position(), BODY_START + 4);
}

#[test]
fn overrun_in_the_last_chunk() {
    // a text event declaring 5 payload bytes, and a note on missing its velocity
    let bodies: [&[u8]; 2] = [&[0x00, 0xFF, 0x01, 0x05], &[0x00, 0x90, 0x3C]];
    for body in bodies {
        let err = MidiFile::parse(&file_with_track(body.len() as u32, body)).unwrap_err();

        assert_eq!(
            err.parse_error(),
            Some(&ParseError::TrackChunkOverrun {
                declared: body.len() as u32,
                offset: 0
            }),
            "{body:02X?}"
        );
        assert!(!err.is_out_of_bounds());
        assert_eq!(err.position(), BODY_START);
    }
}

#[test]
fn overrun_does_not_depend_on_what_follows() {
    let body = [0x00, 0xFF, 0x01, 0x05];
    let last = MidiFile::parse(&file_with_track(4, &body)).unwrap_err();

    let mut followed = file_with_track(4, &body);
    followed.extend_from_slice(b"abcde");
    let followed = MidiFile::parse(&followed).unwrap_err();

    assert_eq!(last.parse_error(), followed.parse_error());
    assert_eq!(last.position(), followed.position());
    assert_eq!(last.component(), followed.component());
}

#[test]
fn system_exclusive_terminator_past_the_chunk() {
    // the only 0xF7 belongs to the next chunk's bytes
    let mut bytes = file_with_track(4, &[0x00, 0xF0, 0x43, 0x12]);
    bytes.extend_from_slice(b"MTrk");
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x04, 0xF7, 0xFF, 0x2F, 0x00]);
    let err = MidiFile::parse(&bytes).unwrap_err();

    assert_eq!(
        err.parse_error(),
        Some(&ParseError::TrackChunkOverrun {
            declared: 4,
            offset: 0
        })
    );
    assert_eq!(err.component(), Component::Chunk);
    assert_eq!(err.position(), BODY_START);
}

#[test]
fn event_ending_on_the_boundary() {
    let body = [0x00, 0x90, 0x3C, 0x40, 0x00, 0xFF, 0x2F, 0x00];
    let file = MidiFile::parse(&file_with_track(8, &body)).unwrap();

    let track = file.tracks().next().unwrap();
    assert_eq!(track.events().len(), 2);
    assert!(track.ends_with_end_of_track());
}

#[test]
fn short_declared_length_leaves_bytes_for_the_next_chunk() {
    // the second end of track sits outside the chunk and is not a chunk tag
    let body = [0x00, 0xFF, 0x2F, 0x00, 0x00, 0xFF, 0x2F, 0x00];
    let err = MidiFile::parse(&file_with_track(4, &body)).unwrap_err();

    assert_eq!(
        err.parse_error(),
        Some(&ParseError::UnknownChunkType([0x00, 0xFF, 0x2F, 0x00]))
    );
    assert_eq!(err.position(), BODY_START + 4);
}

#[test]
fn declared_length_past_input() {
    let body = [0x00, 0xFF, 0x2F, 0x00];
    let err = MidiFile::parse(&file_with_track(100, &body)).unwrap_err();

    assert!(err.is_out_of_bounds());
    assert_eq!(err.position(), 14);
}

#[test]
fn unterminated_system_exclusive() {
    let err = SystemEvent::parse(&[0xF0, 0x43, 0x12, 0x00]).unwrap_err();
    assert_eq!(
        err.parse_error(),
        Some(&ParseError::TruncatedSystemExclusive)
    );
    assert_eq!(err.position(), 0);

    let body = [0x00, 0xF0, 0x43, 0x12, 0x00];
    let err = MidiFile::parse(&file_with_track(5, &body)).unwrap_err();
    assert_eq!(
        err.parse_error(),
        Some(&ParseError::TrackChunkOverrun {
            declared: 5,
            offset: 0
        })
    );
}

#[test]
fn wrong_fixed_meta_length() {
    let body = [0x00, 0xFF, 0x51, 0x02, 0x07, 0xA1, 0x00, 0xFF, 0x2F, 0x00];
    let err = MidiFile::parse(&file_with_track(10, &body)).unwrap_err();

    assert_eq!(
        err.parse_error(),
        Some(&ParseError::InvalidMetaLength {
            kind: MetaKind::Tempo,
            expected: 3,
            found: 2
        })
    );
}

#[test]
fn invalid_text_is_reported() {
    let body = [0x00, 0xFF, 0x03, 0x02, 0xC3, 0x28, 0x00, 0xFF, 0x2F, 0x00];
    let err = MidiFile::parse(&file_with_track(10, &body)).unwrap_err();

    assert!(matches!(err.parse_error(), Some(ParseError::InvalidText(_))));
}

#[test]
fn reset_is_not_a_system_event() {
    let err = SystemEvent::parse(&[0xFF]).unwrap_err();
    assert_eq!(
        err.parse_error(),
        Some(&ParseError::UnknownEventType {
            family: EventFamily::System,
            tag: 0xFF
        })
    );
}

#[test]
fn header_with_bad_length() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"MThd");
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x01]);
    let err = MidiFile::parse(&bytes).unwrap_err();

    assert_eq!(err.parse_error(), Some(&ParseError::InvalidHeaderChunk(4)));
    assert_eq!(err.position(), 0);
}

#[test]
fn sysex_payload_with_terminator_is_not_encoded() {
    let track = TrackChunk::new(vec![TrackEvent::new(
        0,
        SystemEvent::Exclusive(vec![0x43, 0xF7, 0x00]),
    )]);
    let file = MidiFile::new(vec![track.into()]);

    assert!(matches!(
        file.encode(),
        Err(WriterError::SysExTerminatorInPayload(1))
    ));
}

#[test]
fn errors_display_their_position() {
    let err = TrackEvent::parse(&[0x00, 0xF4]).unwrap_err();
    let message = err.to_string();

    assert!(message.contains("position 1"), "{message}");
    assert!(message.contains("event"), "{message}");
}
