use pretty_assertions::assert_eq;
use smfcodec::prelude::*;

/// A format 1 file: a tempo map track and a single instrument track
fn two_track_file() -> Vec<u8> {
    let mut bytes = Vec::new();

    bytes.extend_from_slice(b"MThd");
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x06]);
    bytes.extend_from_slice(&[0x00, 0x01]); // format 1
    bytes.extend_from_slice(&[0x00, 0x02]); // two tracks
    bytes.extend_from_slice(&[0x00, 0x60]); // 96 ticks per quarter note

    bytes.extend_from_slice(b"MTrk");
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x23]);
    bytes.extend_from_slice(&[0x00, 0xFF, 0x03, 0x05, b'T', b'e', b'm', b'p', b'o']);
    bytes.extend_from_slice(&[0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20]); // 120 bpm
    bytes.extend_from_slice(&[0x00, 0xFF, 0x58, 0x04, 0x04, 0x02, 0x18, 0x08]); // 4/4
    bytes.extend_from_slice(&[0x00, 0xFF, 0x59, 0x02, 0xFD, 0x00]); // three flats, major
    bytes.extend_from_slice(&[0x83, 0x60, 0xFF, 0x2F, 0x00]);

    bytes.extend_from_slice(b"MTrk");
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x1D]);
    bytes.extend_from_slice(&[0x00, 0xC0, 0x05]); // program change
    bytes.extend_from_slice(&[0x00, 0xB0, 0x07, 0x64]); // volume
    bytes.extend_from_slice(&[0x00, 0xF0, 0x43, 0x12, 0x00, 0xF7]); // sysex
    bytes.extend_from_slice(&[0x00, 0x90, 0x3C, 0x40]);
    bytes.extend_from_slice(&[0x60, 0xE0, 0x00, 0x40]); // centered pitch bend
    bytes.extend_from_slice(&[0x00, 0x80, 0x3C, 0x40]);
    bytes.extend_from_slice(&[0x00, 0xFF, 0x2F, 0x00]);

    bytes
}

fn voice(delta_time: u32, event: VoiceEvent) -> TrackEvent {
    TrackEvent::new(delta_time, ChannelVoiceEvent::new(Channel::One, event))
}

#[test]
fn decodes_two_track_file() {
    let file = MidiFile::parse(&two_track_file()).unwrap();

    assert_eq!(file.chunks().len(), 3);
    assert_eq!(file.header(), Some(&HeaderChunk::new(1, 2, 96)));

    let tracks: Vec<&TrackChunk> = file.tracks().collect();
    assert_eq!(
        tracks[0].events(),
        [
            TrackEvent::new(0, MetaEvent::TrackName("Tempo".to_string())),
            TrackEvent::new(0, MetaEvent::Tempo(Tempo::default())),
            TrackEvent::new(0, MetaEvent::TimeSignature([0x04, 0x02, 0x18, 0x08])),
            TrackEvent::new(0, MetaEvent::KeySignature([0xFD, 0x00])),
            TrackEvent::new(480, MetaEvent::EndOfTrack),
        ]
    );
    assert_eq!(
        tracks[1].events(),
        [
            voice(0, VoiceEvent::ProgramChange { program: 5 }),
            voice(
                0,
                VoiceEvent::ControlChange {
                    controller: 7,
                    value: 100
                }
            ),
            TrackEvent::new(0, SystemEvent::Exclusive(vec![0x43, 0x12, 0x00])),
            voice(
                0,
                VoiceEvent::NoteOn {
                    note: 60,
                    velocity: 64
                }
            ),
            voice(96, VoiceEvent::PitchBend { lsb: 0, msb: 0x40 }),
            voice(
                0,
                VoiceEvent::NoteOff {
                    note: 60,
                    velocity: 64
                }
            ),
            TrackEvent::new(0, MetaEvent::EndOfTrack),
        ]
    );
}

#[test]
fn re_encodes_byte_for_byte() {
    let bytes = two_track_file();
    let file = MidiFile::parse(&bytes).unwrap();

    assert_eq!(file.encoded_len(), bytes.len());
    assert_eq!(file.encode().unwrap(), bytes);
}

#[test]
fn decode_of_encode_is_identity() {
    let file = MidiFile::new(vec![
        HeaderChunk::from_parts(
            FormatType::SingleMultiChannel,
            1,
            Timing::new_ticks_per_quarter_note(480),
        )
        .into(),
        TrackChunk::new(vec![
            TrackEvent::new(0, MetaEvent::SequenceNumber(Some(3))),
            TrackEvent::new(0, MetaEvent::Copyright("(c) nobody".to_string())),
            TrackEvent::new(0, MetaEvent::ChannelPrefix(9)),
            TrackEvent::new(0, MetaEvent::SequencerSpecific(vec![0x00, 0x00, 0x41])),
            TrackEvent::new(
                0,
                ChannelVoiceEvent::new(
                    Channel::Ten,
                    VoiceEvent::NoteOn {
                        note: 36,
                        velocity: 127,
                    },
                ),
            ),
            TrackEvent::new(
                0x0FFF_FFFF,
                ChannelVoiceEvent::new(Channel::Ten, VoiceEvent::ChannelPressure { pressure: 3 }),
            ),
            TrackEvent::new(0, SystemEvent::SongPosition { lsb: 0x10, msb: 0x02 }),
            TrackEvent::new(0, SystemEvent::TuneRequest),
            TrackEvent::new(0, MetaEvent::EndOfTrack),
        ])
        .into(),
    ]);

    let bytes = file.encode().unwrap();
    assert_eq!(bytes.len(), file.encoded_len());
    assert_eq!(MidiFile::parse(&bytes).unwrap(), file);
}

#[test]
fn edits_change_the_chunk_length() {
    let bytes = two_track_file();
    let mut file = MidiFile::parse(&bytes).unwrap();

    let tempo_track = file.tracks_mut().next().unwrap();
    tempo_track.events_mut()[0].event = MetaEvent::TrackName("Conductor".to_string()).into();

    let encoded = file.encode().unwrap();
    assert_eq!(encoded.len(), bytes.len() + 4);
    // first track length, right after the 14 byte header
    assert_eq!(encoded[18..22], [0x00, 0x00, 0x00, 0x27]);
    assert_eq!(MidiFile::parse(&encoded).unwrap(), file);
}

#[test]
fn scenario_header() {
    let bytes = [
        0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x01, 0x00, 0x02, 0x00, 0x60,
    ];
    let (chunk, len) = Chunk::parse(&bytes).unwrap();
    assert_eq!(len, 14);
    assert_eq!(
        chunk,
        Chunk::Header(HeaderChunk {
            format: 1,
            track_count: 2,
            division: 96
        })
    );
    assert_eq!(chunk.to_bytes().unwrap(), bytes);
}

#[test]
fn scenario_note_on() {
    let bytes = [0x00, 0x90, 0x3C, 0x40];
    let (event, len) = TrackEvent::parse(&bytes).unwrap();
    assert_eq!(len, 4);
    assert_eq!(
        event,
        voice(
            0,
            VoiceEvent::NoteOn {
                note: 60,
                velocity: 64
            }
        )
    );
    assert_eq!(event.to_bytes().unwrap(), bytes);
}

#[test]
fn scenario_end_of_track() {
    let (event, len) = TrackEvent::parse(&[0x00, 0xFF, 0x2F, 0x00]).unwrap();
    assert_eq!(len, 4);
    assert_eq!(event, TrackEvent::new(0, MetaEvent::EndOfTrack));
}

#[test]
fn scenario_truncated_varlen() {
    for bytes in [
        &[0x80][..],
        &[0xFF, 0xFF][..],
        &[0x00, 0xFF, 0x01, 0x81][..],
    ] {
        let err = TrackEvent::parse(bytes).unwrap_err();
        assert_eq!(err.parse_error(), Some(&ParseError::TruncatedVarLen));
        assert_eq!(err.component(), Component::VarLen);
    }
}
