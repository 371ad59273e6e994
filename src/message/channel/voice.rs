use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::writer::Writer;

/// The high nibble of a channel voice status byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum VoiceKind {
    /// `0x8n`
    NoteOff = 0x80,
    /// `0x9n`
    NoteOn = 0x90,
    /// `0xAn`, polyphonic key pressure
    PolyPressure = 0xA0,
    /// `0xBn`
    ControlChange = 0xB0,
    /// `0xCn`
    ProgramChange = 0xC0,
    /// `0xDn`, channel aftertouch
    ChannelPressure = 0xD0,
    /// `0xEn`
    PitchBend = 0xE0,
}

impl VoiceKind {
    /// Number of data bytes following the status byte.
    pub const fn data_len(&self) -> usize {
        match self {
            Self::ProgramChange | Self::ChannelPressure => 1,
            Self::NoteOff
            | Self::NoteOn
            | Self::PolyPressure
            | Self::ControlChange
            | Self::PitchBend => 2,
        }
    }
}

#[doc = r#"
The body of a channel voice event

Data bytes are kept exactly as they appear in the file.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum VoiceEvent {
    NoteOff { note: u8, velocity: u8 },
    NoteOn { note: u8, velocity: u8 },
    PolyPressure { note: u8, pressure: u8 },
    ControlChange { controller: u8, value: u8 },
    ProgramChange { program: u8 },
    ChannelPressure { pressure: u8 },
    /// 14-bit bend, least significant seven bits first
    PitchBend { lsb: u8, msb: u8 },
}

impl VoiceEvent {
    /// Identifies the status nibble of the event
    pub const fn kind(&self) -> VoiceKind {
        match self {
            Self::NoteOff { .. } => VoiceKind::NoteOff,
            Self::NoteOn { .. } => VoiceKind::NoteOn,
            Self::PolyPressure { .. } => VoiceKind::PolyPressure,
            Self::ControlChange { .. } => VoiceKind::ControlChange,
            Self::ProgramChange { .. } => VoiceKind::ProgramChange,
            Self::ChannelPressure { .. } => VoiceKind::ChannelPressure,
            Self::PitchBend { .. } => VoiceKind::PitchBend,
        }
    }

    /// The note the event refers to, for note and key pressure events
    pub const fn note(&self) -> Option<u8> {
        match self {
            Self::NoteOff { note, .. }
            | Self::NoteOn { note, .. }
            | Self::PolyPressure { note, .. } => Some(*note),
            _ => None,
        }
    }

    /// For a pitch bend, the combined 14-bit value. `0x2000` is centered.
    pub const fn pitch_bend(&self) -> Option<u16> {
        match self {
            Self::PitchBend { lsb, msb } => {
                Some(((*msb as u16 & 0x7F) << 7) | (*lsb as u16 & 0x7F))
            }
            _ => None,
        }
    }

    pub(crate) fn write_data(&self, writer: &mut Writer) {
        match *self {
            Self::NoteOff { note, velocity } | Self::NoteOn { note, velocity } => {
                writer.write_all(&[note, velocity])
            }
            Self::PolyPressure { note, pressure } => writer.write_all(&[note, pressure]),
            Self::ControlChange { controller, value } => writer.write_all(&[controller, value]),
            Self::ProgramChange { program } => writer.write_u8(program),
            Self::ChannelPressure { pressure } => writer.write_u8(pressure),
            Self::PitchBend { lsb, msb } => writer.write_all(&[lsb, msb]),
        }
    }
}

#[test]
fn pitch_bend_value() {
    use pretty_assertions::assert_eq;

    let centered = VoiceEvent::PitchBend {
        lsb: 0x00,
        msb: 0x40,
    };
    assert_eq!(centered.pitch_bend(), Some(0x2000));

    let max = VoiceEvent::PitchBend {
        lsb: 0x7F,
        msb: 0x7F,
    };
    assert_eq!(max.pitch_bend(), Some(0x3FFF));
    assert_eq!(VoiceEvent::ProgramChange { program: 1 }.pitch_bend(), None);
}

#[test]
fn data_lengths() {
    use pretty_assertions::assert_eq;

    assert_eq!(VoiceKind::NoteOn.data_len(), 2);
    assert_eq!(VoiceKind::PitchBend.data_len(), 2);
    assert_eq!(VoiceKind::ProgramChange.data_len(), 1);
    assert_eq!(VoiceKind::ChannelPressure.data_len(), 1);
}
