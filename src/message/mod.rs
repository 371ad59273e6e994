#![doc = r#"
The event families that share the MIDI 1.0 wire protocol

# Hierarchy
```text
                 |-------|
                 | Event |
                 |-------|
               /     |     \
|---------------|  |--------|  |------|
| Channel Voice |  | System |  | Meta |
|---------------|  |--------|  |------|
```

Meta events only exist inside files and live in [`file::meta`](crate::file).
"#]

pub mod channel;
pub use channel::*;

pub mod system;
pub use system::*;
