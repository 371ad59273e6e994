use pretty_assertions::assert_eq;
use smfcodec::prelude::*;

/// A format 0 file with SMPTE timing whose only track starts at the given time code
fn file_with_offset(fps: SmpteFps, time_code: [u8; 4], subframe: u8) -> Vec<u8> {
    let [hour, minute, second, frame] = time_code;
    let mut bytes = Vec::new();

    bytes.extend_from_slice(b"MThd");
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x06, 0x00, 0x00, 0x00, 0x01]);
    // negated frame rate, then 40 ticks per frame
    bytes.push(-(fps.as_division() as i8) as u8);
    bytes.push(40);

    let mut body = vec![0x00, 0xFF, 0x54, 0x05];
    body.extend_from_slice(&[
        (fps.offset_bits() << 5) | (hour & 0x1F),
        minute,
        second,
        frame,
        subframe,
    ]);
    body.extend_from_slice(&[0x00, 0x90, 0x3C, 0x64]);
    body.extend_from_slice(&[0x28, 0x80, 0x3C, 0x40]);
    body.extend_from_slice(&[0x00, 0xFF, 0x2F, 0x00]);

    bytes.extend_from_slice(b"MTrk");
    bytes.extend_from_slice(&(body.len() as u32).to_be_bytes());
    bytes.extend_from_slice(&body);
    bytes
}

/// Decodes the offset carried by the first event of the first track
fn first_offset(file: &MidiFile) -> SmpteOffset {
    let track = file.tracks().next().unwrap();
    let Event::Meta(MetaEvent::SmpteOffset(raw)) = &track.events()[0].event else {
        panic!("expected an SMPTE offset, got {:?}", track.events()[0]);
    };
    SmpteOffset::parse(raw).unwrap()
}

#[test]
fn offset_at_24fps() {
    let bytes = file_with_offset(SmpteFps::TwentyFour, [12, 30, 15, 18], 50);
    let file = MidiFile::parse(&bytes).unwrap();

    let Ok(Timing::Smpte(smpte)) = file.header().unwrap().timing() else {
        panic!("expected SMPTE timing");
    };
    assert_eq!(smpte.fps(), SmpteFps::TwentyFour);
    assert_eq!(smpte.ticks_per_frame(), 40);

    let offset = first_offset(&file);
    assert_eq!(
        offset,
        SmpteOffset {
            fps: SmpteFps::TwentyFour,
            hour: 12,
            minute: 30,
            second: 15,
            frame: 18,
            subframe: 50,
        }
    );
    let expected = (12 * 3600 + 30 * 60 + 15) as f64 * 1_000_000.
        + (18. / 24.) * 1_000_000.
        + (50. / 100. / 24.) * 1_000_000.;
    assert!((offset.as_micros() - expected).abs() < 0.01);
}

#[test]
fn offset_at_every_rate() {
    for fps in [
        SmpteFps::TwentyFour,
        SmpteFps::TwentyFive,
        SmpteFps::TwentyNine,
        SmpteFps::Thirty,
    ] {
        let bytes = file_with_offset(fps, [1, 2, 3, 4], 5);
        let file = MidiFile::parse(&bytes).unwrap();

        let timing = file.header().unwrap().timing().unwrap();
        assert_eq!(timing, Timing::new_smpte(fps, 40));
        assert_eq!(first_offset(&file).fps, fps);
        assert_eq!(file.encode().unwrap(), bytes);
    }
}

#[test]
fn drop_frame_offset() {
    let bytes = file_with_offset(SmpteFps::TwentyNine, [0, 0, 0, 1], 0);
    let file = MidiFile::parse(&bytes).unwrap();

    // one frame at 30000/1001 fps
    let micros = first_offset(&file).as_micros();
    assert!((micros - 1_001_000. / 30.).abs() < 0.001);
}

#[test]
fn invalid_offset_still_round_trips() {
    // hour 25 does not validate, but the payload is kept as it was read
    let bytes = file_with_offset(SmpteFps::Thirty, [25, 0, 0, 0], 0);
    let file = MidiFile::parse(&bytes).unwrap();

    let track = file.tracks().next().unwrap();
    let Event::Meta(MetaEvent::SmpteOffset(raw)) = &track.events()[0].event else {
        panic!("expected an SMPTE offset");
    };
    assert_eq!(SmpteOffset::parse(raw), Err(SmpteError::HourOffset(25)));
    assert_eq!(file.encode().unwrap(), bytes);
}

#[test]
fn offset_written_from_fields() {
    let offset = SmpteOffset {
        fps: SmpteFps::TwentyFive,
        hour: 1,
        minute: 0,
        second: 1,
        frame: 12,
        subframe: 75,
    };
    let event = MetaEvent::SmpteOffset(offset.to_bytes());

    let bytes = TrackEvent::new(0, event).to_bytes().unwrap();
    assert_eq!(bytes, [0x00, 0xFF, 0x54, 0x05, 0x21, 0x00, 0x01, 0x0C, 0x4B]);
}
