use pretty_assertions::assert_eq;
use smfcodec::prelude::*;
use tempfile::tempdir;

fn single_note() -> MidiFile {
    MidiFile::new(vec![
        HeaderChunk::from_parts(
            FormatType::SingleMultiChannel,
            1,
            Timing::new_ticks_per_quarter_note(96),
        )
        .into(),
        TrackChunk::new(vec![
            TrackEvent::new(
                0,
                ChannelVoiceEvent::new(
                    Channel::Three,
                    VoiceEvent::NoteOn {
                        note: 67,
                        velocity: 90,
                    },
                ),
            ),
            TrackEvent::new(
                192,
                ChannelVoiceEvent::new(
                    Channel::Three,
                    VoiceEvent::NoteOff {
                        note: 67,
                        velocity: 0,
                    },
                ),
            ),
            TrackEvent::new(0, MetaEvent::EndOfTrack),
        ])
        .into(),
    ])
}

#[test]
fn export_then_open() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("single_note.mid");
    let file = single_note();

    file.export(&path).unwrap();
    let written = std::fs::read(&path).unwrap();
    let opened = MidiFile::open(&path).unwrap();

    assert_eq!(written, file.encode().unwrap());
    assert_eq!(opened, file);
}

#[test]
fn open_missing_file() {
    let temp = tempdir().unwrap();
    let err = MidiFile::open(temp.path().join("missing.mid")).unwrap_err();

    assert!(matches!(err.error_kind(), ReaderErrorKind::Io(_)));
    assert_eq!(err.component(), Component::File);
}
