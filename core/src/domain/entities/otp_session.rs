//! Six-slot passcode entry and the attempt lifecycle of a verification session.

use serde::Serialize;

use crate::errors::DigitError;

/// Length of the verification code
pub const CODE_LENGTH: usize = recovery_shared::OTP_CODE_LENGTH;

/// Lifecycle of a verification attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptState {
    /// User is typing the code
    #[default]
    Entering,
    /// Code handed to the verifier, awaiting an answer
    Submitting,
    /// Verifier accepted the code; terminal
    Verified,
    /// Verifier rejected the code or failed; behaves like `Entering`
    Failed,
}

impl AttemptState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, AttemptState::Verified)
    }

    /// Whether a new submit or resend may start from this state
    pub fn accepts_requests(&self) -> bool {
        matches!(self, AttemptState::Entering | AttemptState::Failed)
    }
}

/// Where the UI should move input focus after an edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "action", content = "index")]
pub enum FocusIntent {
    /// Keep focus where it is
    Hold,
    /// Focus the slot at this index
    MoveTo(usize),
}

impl FocusIntent {
    pub fn target(&self) -> Option<usize> {
        match self {
            FocusIntent::Hold => None,
            FocusIntent::MoveTo(index) => Some(*index),
        }
    }
}

/// Fixed-size slots for the digits of a passcode.
///
/// There are always exactly [`CODE_LENGTH`] slots and a filled slot only
/// ever holds an ASCII digit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OtpDigits {
    slots: [Option<char>; CODE_LENGTH],
}

impl OtpDigits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the last character of `input` at `index`.
    ///
    /// Empty input clears the slot. A trailing non-digit leaves the slot as
    /// it was. Setting a digit before the last slot asks the UI to advance.
    pub fn set(&mut self, index: usize, input: &str) -> Result<FocusIntent, DigitError> {
        Self::check_index(index)?;

        match input.chars().last() {
            None => {
                self.slots[index] = None;
                Ok(FocusIntent::Hold)
            }
            Some(c) if c.is_ascii_digit() => {
                self.slots[index] = Some(c);
                if index + 1 < CODE_LENGTH {
                    Ok(FocusIntent::MoveTo(index + 1))
                } else {
                    Ok(FocusIntent::Hold)
                }
            }
            Some(_) => Ok(FocusIntent::Hold),
        }
    }

    /// Backspace on an empty slot retreats focus to the previous one
    pub fn backspace(&self, index: usize) -> Result<FocusIntent, DigitError> {
        Self::check_index(index)?;

        if self.slots[index].is_none() && index > 0 {
            Ok(FocusIntent::MoveTo(index - 1))
        } else {
            Ok(FocusIntent::Hold)
        }
    }

    /// Empty the slot at `index`; focus stays put
    pub fn clear_at(&mut self, index: usize) -> Result<FocusIntent, DigitError> {
        Self::check_index(index)?;
        self.slots[index] = None;
        Ok(FocusIntent::Hold)
    }

    /// Fill every slot from a pasted code, ignoring whitespace
    pub fn paste(&mut self, input: &str) -> Result<FocusIntent, DigitError> {
        let digits: Vec<char> = input.chars().filter(|c| !c.is_whitespace()).collect();
        if digits.len() != CODE_LENGTH || !digits.iter().all(char::is_ascii_digit) {
            return Err(DigitError::InvalidPaste {
                expected: CODE_LENGTH,
            });
        }

        for (slot, digit) in self.slots.iter_mut().zip(digits) {
            *slot = Some(digit);
        }
        Ok(FocusIntent::MoveTo(CODE_LENGTH - 1))
    }

    pub fn clear(&mut self) {
        self.slots = [None; CODE_LENGTH];
    }

    /// Number of slots holding a digit
    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.filled() == CODE_LENGTH
    }

    /// The joined code, only when every slot holds a digit
    pub fn code(&self) -> Option<String> {
        self.slots
            .iter()
            .map(|slot| slot.filter(char::is_ascii_digit))
            .collect()
    }

    pub fn slots(&self) -> [Option<char>; CODE_LENGTH] {
        self.slots
    }

    fn check_index(index: usize) -> Result<(), DigitError> {
        if index < CODE_LENGTH {
            Ok(())
        } else {
            Err(DigitError::IndexOutOfRange {
                index,
                len: CODE_LENGTH,
            })
        }
    }
}
