//! Verification code issuance, the six digit-cell input and the resend
//! cooldown control.

use crate::flow::FlowError;
use rand::Rng;
use std::{fmt, ops::RangeInclusive};

pub const CODE_LEN: usize = 6;

/// Issued codes never start with a zero.
pub const CODE_RANGE: RangeInclusive<u32> = 100_000..=999_999;

pub const RESEND_LABEL: &str = "Resend Code";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationCode(String);

impl VerificationCode {
    pub fn issue<R: Rng>(rng: &mut R) -> Self {
        Self(rng.gen_range(CODE_RANGE).to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact comparison against the collected cell digits.
    ///
    /// # Errors
    /// `IncompleteCode` when fewer than six digits were collected,
    /// `CodeMismatch` when they differ from this code.
    pub fn check(&self, candidate: &str) -> Result<(), FlowError> {
        if candidate.chars().count() != CODE_LEN {
            return Err(FlowError::IncompleteCode);
        }
        if candidate == self.0 {
            Ok(())
        } else {
            Err(FlowError::CodeMismatch)
        }
    }
}

impl fmt::Display for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Six single-digit inputs with focus tracking and an error highlight.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeCells {
    digits: [Option<char>; CODE_LEN],
    focus: usize,
    highlighted: bool,
}

impl CodeCells {
    fn cell(index: usize) -> Result<usize, FlowError> {
        if index < CODE_LEN {
            Ok(index)
        } else {
            Err(FlowError::InvalidArgument(format!(
                "code cell {index} out of range 0..{CODE_LEN}"
            )))
        }
    }

    /// Apply the value typed into a cell. Anything but a single ASCII digit
    /// clears the cell; a digit moves focus to the next cell.
    ///
    /// # Errors
    /// Returns an error if `index` is not a cell.
    pub fn input(&mut self, index: usize, value: &str) -> Result<(), FlowError> {
        let index = Self::cell(index)?;
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(digit), None) if digit.is_ascii_digit() => {
                self.digits[index] = Some(digit);
                self.focus = if index < CODE_LEN - 1 { index + 1 } else { index };
            }
            _ => {
                self.digits[index] = None;
                self.focus = index;
            }
        }
        Ok(())
    }

    /// Backspace on an empty cell steps back; on a filled one it clears it.
    ///
    /// # Errors
    /// Returns an error if `index` is not a cell.
    pub fn backspace(&mut self, index: usize) -> Result<(), FlowError> {
        let index = Self::cell(index)?;
        if self.digits[index].is_some() {
            self.digits[index] = None;
            self.focus = index;
        } else if index > 0 {
            self.focus = index - 1;
        }
        Ok(())
    }

    /// Distribute pasted digits from the first cell, whichever cell got the
    /// paste. Non-digit content is ignored.
    ///
    /// # Errors
    /// Returns an error if `index` is not a cell.
    pub fn paste(&mut self, index: usize, text: &str) -> Result<(), FlowError> {
        Self::cell(index)?;
        let pasted: Vec<char> = text.chars().take(CODE_LEN).collect();
        if pasted.is_empty() || !pasted.iter().all(char::is_ascii_digit) {
            return Ok(());
        }
        for (slot, digit) in self.digits.iter_mut().zip(&pasted) {
            *slot = Some(*digit);
        }
        self.focus = pasted.len().min(CODE_LEN) - 1;
        Ok(())
    }

    /// Concatenation of the filled cells.
    #[must_use]
    pub fn collected(&self) -> String {
        self.digits.iter().flatten().collect()
    }

    #[must_use]
    pub fn digit(&self, index: usize) -> Option<char> {
        self.digits.get(index).copied().flatten()
    }

    #[must_use]
    pub const fn focus(&self) -> usize {
        self.focus
    }

    #[must_use]
    pub const fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.digits.iter().all(Option::is_none)
    }

    pub fn clear(&mut self) {
        self.digits = [None; CODE_LEN];
    }

    /// Clear every cell, flag the error and focus the first cell.
    pub fn reject(&mut self) {
        self.clear();
        self.highlighted = true;
        self.focus = 0;
    }

    pub fn clear_highlight(&mut self) {
        self.highlighted = false;
    }
}

/// Resend button state: enabled, or disabled with a countdown in seconds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResendControl {
    remaining: u32,
}

impl ResendControl {
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.remaining == 0
    }

    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn label(&self) -> String {
        if self.remaining == 0 {
            RESEND_LABEL.to_string()
        } else {
            format!("Resend in {}s", self.remaining)
        }
    }

    /// Disable the control for `seconds`.
    ///
    /// # Errors
    /// Returns `ResendUnavailable` if the control is already disabled.
    pub fn start(&mut self, seconds: u32) -> Result<(), FlowError> {
        if !self.is_enabled() {
            return Err(FlowError::ResendUnavailable {
                remaining: self.remaining,
            });
        }
        self.remaining = seconds;
        Ok(())
    }

    /// One second elapsed; returns true while the countdown keeps running.
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining > 0
    }
}
