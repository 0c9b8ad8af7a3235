//! Script byte buffers
//!
//! Only the push encodings needed to lay out coinbase input scripts.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

use crate::constants::MAX_SCRIPT_SIZE;

/// Opcodes used when encoding pushes
pub mod opcodes {
    pub const OP_0: u8 = 0x00;
    /// Largest opcode that pushes its own value as a byte count
    pub const OP_PUSHBYTES_75: u8 = 0x4b;
    pub const OP_PUSHDATA1: u8 = 0x4c;
    pub const OP_PUSHDATA2: u8 = 0x4d;
    pub const OP_PUSHDATA4: u8 = 0x4e;
}

/// Longest push whose opcode is its own length
const MAX_DIRECT_PUSH: usize = opcodes::OP_PUSHBYTES_75 as usize;

/// Script errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("Script too large: {size} bytes exceeds limit of {max}")]
    TooLarge { size: usize, max: usize },
}

/// Raw script bytes
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Script(Vec<u8>);

impl Script {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Push `data` with the minimal push opcode. An empty slice is OP_0.
    pub fn push_slice(&mut self, data: &[u8]) -> Result<&mut Self, ScriptError> {
        let header_len = match data.len() {
            0..=MAX_DIRECT_PUSH => 1,
            0x4c..=0xff => 2,
            0x100..=0xffff => 3,
            _ => 5,
        };
        self.ensure_room(header_len + data.len())?;

        match data.len() {
            0 => self.0.push(opcodes::OP_0),
            n @ 1..=MAX_DIRECT_PUSH => self.0.push(n as u8),
            n @ 0x4c..=0xff => {
                self.0.push(opcodes::OP_PUSHDATA1);
                self.0.push(n as u8);
            }
            n @ 0x100..=0xffff => {
                self.0.push(opcodes::OP_PUSHDATA2);
                self.0.extend_from_slice(&(n as u16).to_le_bytes());
            }
            n => {
                self.0.push(opcodes::OP_PUSHDATA4);
                self.0.extend_from_slice(&(n as u32).to_le_bytes());
            }
        }
        self.0.extend_from_slice(data);
        Ok(self)
    }

    /// Append an opcode followed verbatim by its operand bytes
    pub fn push_op_with_data(&mut self, opcode: u8, data: &[u8]) -> Result<&mut Self, ScriptError> {
        self.ensure_room(1 + data.len())?;
        self.0.push(opcode);
        self.0.extend_from_slice(data);
        Ok(self)
    }

    fn ensure_room(&self, extra: usize) -> Result<(), ScriptError> {
        let size = self.0.len().saturating_add(extra);
        if size > MAX_SCRIPT_SIZE {
            return Err(ScriptError::TooLarge { size, max: MAX_SCRIPT_SIZE });
        }
        Ok(())
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", hex::encode(&self.0))
    }
}

impl Serialize for Script {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(&self.0))
    }
}

impl<'de> Deserialize<'de> for Script {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        hex::decode(text).map(Script).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_push_is_op_0() {
        let mut script = Script::new();
        script.push_slice(&[]).unwrap();
        assert_eq!(script.as_bytes(), &[opcodes::OP_0]);
    }

    #[test]
    fn test_direct_push() {
        let mut script = Script::new();
        script.push_slice(&[42]).unwrap();
        assert_eq!(script.as_bytes(), &[0x01, 42]);
    }

    #[test]
    fn test_direct_push_boundary() {
        let mut script = Script::new();
        script.push_slice(&[7u8; MAX_DIRECT_PUSH]).unwrap();
        assert_eq!(script.as_bytes()[0], opcodes::OP_PUSHBYTES_75);
        assert_eq!(script.len(), 1 + MAX_DIRECT_PUSH);
    }

    #[test]
    fn test_pushdata_widths() {
        let mut one = Script::new();
        one.push_slice(&[7u8; 0x4c]).unwrap();
        assert_eq!(&one.as_bytes()[..2], &[opcodes::OP_PUSHDATA1, 0x4c]);

        let mut two = Script::new();
        two.push_slice(&[7u8; 0x100]).unwrap();
        assert_eq!(&two.as_bytes()[..3], &[opcodes::OP_PUSHDATA2, 0x00, 0x01]);
        assert_eq!(two.len(), 3 + 0x100);
    }

    #[test]
    fn test_op_with_data() {
        let mut script = Script::new();
        script.push_op_with_data(0x01, &[42]).unwrap();
        assert_eq!(script.as_bytes(), &[0x01, 42]);
    }

    #[test]
    fn test_push_over_limit_fails() {
        let mut script = Script::new();
        let err = script.push_slice(&vec![0u8; MAX_SCRIPT_SIZE]).unwrap_err();
        assert_eq!(
            err,
            ScriptError::TooLarge { size: MAX_SCRIPT_SIZE + 3, max: MAX_SCRIPT_SIZE }
        );
        assert!(script.is_empty());
    }
}
