#![doc = r#"
Contains all Channel Voice event types

A channel voice status byte carries the event kind in its high nibble and
the channel in its low nibble.

```text
1001 0011  ->  NoteOn, Channel::Four
^^^^ ^^^^
kind chan
```
"#]

mod voice;
pub use voice::*;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::{
    ParseError,
    events::EventFamily,
    reader::{At, Component, ReadResult, Reader},
    writer::Writer,
};

/// One of the sixteen MIDI channels, `One` being wire value 0.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, TryFromPrimitive, IntoPrimitive,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Channel {
    One = 0,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Eleven,
    Twelve,
    Thirteen,
    Fourteen,
    Fifteen,
    Sixteen,
}

impl Channel {
    /// The channel in the low nibble of a status byte.
    pub const fn from_status(status: u8) -> Self {
        use Channel::*;
        match status & 0x0F {
            0 => One,
            1 => Two,
            2 => Three,
            3 => Four,
            4 => Five,
            5 => Six,
            6 => Seven,
            7 => Eight,
            8 => Nine,
            9 => Ten,
            10 => Eleven,
            11 => Twelve,
            12 => Thirteen,
            13 => Fourteen,
            14 => Fifteen,
            _ => Sixteen,
        }
    }

    /// The wire value, 0-15.
    pub const fn to_byte(self) -> u8 {
        self as u8
    }
}

#[doc = r#"
A channel voice event: a [`VoiceEvent`] addressed to a [`Channel`]

# Example
```rust
# use smfcodec::prelude::*;
let (event, len) = ChannelVoiceEvent::parse(&[0x93, 0x3C, 0x40]).unwrap();

assert_eq!(len, 3);
assert_eq!(event.channel(), Channel::Four);
assert_eq!(event.event(), &VoiceEvent::NoteOn { note: 60, velocity: 64 });
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelVoiceEvent {
    channel: Channel,
    event: VoiceEvent,
}

impl ChannelVoiceEvent {
    /// Address `event` to `channel`.
    pub const fn new(channel: Channel, event: VoiceEvent) -> Self {
        Self { channel, event }
    }

    /// Decode from the start of `bytes`, returning the event and its length.
    pub fn parse(bytes: &[u8]) -> ReadResult<(Self, usize)> {
        let mut reader = Reader::from_byte_slice(bytes);
        let event = Self::read(&mut reader)?;
        Ok((event, reader.buffer_position()))
    }

    /// Returns the channel the event is addressed to.
    pub const fn channel(&self) -> Channel {
        self.channel
    }

    /// Readdress the event.
    pub fn set_channel(&mut self, channel: Channel) {
        self.channel = channel;
    }

    /// Returns the voice event.
    pub const fn event(&self) -> &VoiceEvent {
        &self.event
    }

    /// Returns the voice event for modification.
    pub fn event_mut(&mut self) -> &mut VoiceEvent {
        &mut self.event
    }

    /// The status byte this event is sent with.
    pub const fn status(&self) -> u8 {
        self.event.kind() as u8 | self.channel.to_byte()
    }

    /// Total encoded size, status byte included.
    pub const fn encoded_len(&self) -> usize {
        1 + self.event.kind().data_len()
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let start = reader.buffer_position();
        let status = reader.read_next().at(start, Component::Event)?;
        let kind = VoiceKind::try_from(status & 0xF0)
            .map_err(|_| ParseError::UnknownEventType {
                family: EventFamily::ChannelVoice,
                tag: status,
            })
            .at(start, Component::Event)?;

        let mut data = || reader.read_next().at(start, Component::Event);
        use VoiceEvent::*;
        let event = match kind {
            VoiceKind::NoteOff => NoteOff {
                note: data()?,
                velocity: data()?,
            },
            VoiceKind::NoteOn => NoteOn {
                note: data()?,
                velocity: data()?,
            },
            VoiceKind::PolyPressure => PolyPressure {
                note: data()?,
                pressure: data()?,
            },
            VoiceKind::ControlChange => ControlChange {
                controller: data()?,
                value: data()?,
            },
            VoiceKind::ProgramChange => ProgramChange { program: data()? },
            VoiceKind::ChannelPressure => ChannelPressure { pressure: data()? },
            VoiceKind::PitchBend => PitchBend {
                lsb: data()?,
                msb: data()?,
            },
        };

        Ok(Self {
            channel: Channel::from_status(status),
            event,
        })
    }

    pub(crate) fn write(&self, writer: &mut Writer) {
        writer.write_u8(self.status());
        self.event.write_data(writer);
    }
}

#[test]
fn channel_nibbles() {
    use pretty_assertions::assert_eq;

    for byte in 0..=15u8 {
        let channel = Channel::from_status(0x90 | byte);
        assert_eq!(channel.to_byte(), byte);
        assert_eq!(Channel::try_from(byte).ok(), Some(channel));
    }
    assert!(Channel::try_from(16u8).is_err());
}

#[test]
fn decode_every_kind() {
    use pretty_assertions::assert_eq;

    let cases: [(&[u8], VoiceEvent); 7] = [
        (
            &[0x80, 0x3C, 0x40],
            VoiceEvent::NoteOff {
                note: 0x3C,
                velocity: 0x40,
            },
        ),
        (
            &[0x91, 0x3C, 0x00],
            VoiceEvent::NoteOn {
                note: 0x3C,
                velocity: 0,
            },
        ),
        (
            &[0xA2, 0x40, 0x7F],
            VoiceEvent::PolyPressure {
                note: 0x40,
                pressure: 0x7F,
            },
        ),
        (
            &[0xB3, 0x07, 0x64],
            VoiceEvent::ControlChange {
                controller: 7,
                value: 100,
            },
        ),
        (&[0xC4, 0x05], VoiceEvent::ProgramChange { program: 5 }),
        (&[0xD5, 0x30], VoiceEvent::ChannelPressure { pressure: 0x30 }),
        (
            &[0xEF, 0x00, 0x40],
            VoiceEvent::PitchBend {
                lsb: 0x00,
                msb: 0x40,
            },
        ),
    ];

    for (bytes, expected) in cases {
        let (event, len) = ChannelVoiceEvent::parse(bytes).unwrap();
        assert_eq!(event.event(), &expected);
        assert_eq!(event.channel().to_byte(), bytes[0] & 0x0F);
        assert_eq!(len, bytes.len());
        assert_eq!(event.encoded_len(), bytes.len());

        let mut writer = Writer::new();
        event.write(&mut writer);
        assert_eq!(writer.as_bytes(), bytes);
    }
}

#[test]
fn missing_data_bytes() {
    use pretty_assertions::assert_eq;

    let err = ChannelVoiceEvent::parse(&[0x90, 0x3C]).unwrap_err();
    assert!(err.is_out_of_bounds());
    assert_eq!(err.position(), 0);
    assert_eq!(err.component(), Component::Event);

    assert!(ChannelVoiceEvent::parse(&[0xC0]).unwrap_err().is_out_of_bounds());

    let err = ChannelVoiceEvent::parse(&[0xE5, 0x00]).unwrap_err();
    assert!(err.is_out_of_bounds());
    assert_eq!(err.position(), 0);
}

#[test]
fn rejects_non_voice_status() {
    let err = ChannelVoiceEvent::parse(&[0xF8]).unwrap_err();
    assert!(matches!(
        err.parse_error(),
        Some(ParseError::UnknownEventType {
            family: EventFamily::ChannelVoice,
            tag: 0xF8
        })
    ));
}
