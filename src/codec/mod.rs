#![doc = r#"
Primitive byte codecs shared by every layer of a MIDI file

- [`varlen`]: the base-128 variable-length quantities used for delta-times
  and meta payload lengths
- [`fixed`]: big-endian fixed-width integers and UTF-8 text
"#]

pub mod fixed;
pub mod varlen;
