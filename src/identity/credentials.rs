// ABOUTME: One-time password generation from the operating system CSPRNG
// ABOUTME: Guarantees character-class coverage, zeroizes on drop, and never prints its value
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gatehouse Contributors

//! One-time passwords for newly provisioned administrators
//!
//! Passwords are drawn from [`ring::rand::SystemRandom`] with rejection
//! sampling so every character is uniformly distributed over its alphabet.
//! Look-alike characters (`l`, `I`, `O`, `0`, `1`) are left out because the
//! password is read from an email and typed by hand, and the symbol set
//! avoids characters that HTML would need to escape.

use crate::constants::limits;
use crate::errors::{AppError, AppResult};
use ring::rand::{SecureRandom, SystemRandom};
use std::fmt;
use zeroize::Zeroizing;

const LOWERCASE: &[u8] = b"abcdefghijkmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
const DIGITS: &[u8] = b"23456789";
const SYMBOLS: &[u8] = b"!@#$%^*-_+=?";

/// Longest password this generator will produce
const MAX_LENGTH: usize = 128;

/// A generated password that exists only in memory
#[derive(Clone)]
pub struct OneTimePassword(Zeroizing<String>);

impl OneTimePassword {
    /// Generate a password of `length` characters, clamped to `[16, 128]`
    ///
    /// # Errors
    /// Returns an error if the system random source fails
    pub fn generate(length: usize) -> AppResult<Self> {
        let length = length.clamp(limits::MIN_ONE_TIME_PASSWORD_LENGTH, MAX_LENGTH);
        let rng = SystemRandom::new();

        let mut bytes = Zeroizing::new(Vec::with_capacity(length));
        for class in [LOWERCASE, UPPERCASE, DIGITS, SYMBOLS] {
            bytes.push(pick(&rng, class)?);
        }

        let mut alphabet = Vec::with_capacity(
            LOWERCASE.len() + UPPERCASE.len() + DIGITS.len() + SYMBOLS.len(),
        );
        alphabet.extend_from_slice(LOWERCASE);
        alphabet.extend_from_slice(UPPERCASE);
        alphabet.extend_from_slice(DIGITS);
        alphabet.extend_from_slice(SYMBOLS);
        while bytes.len() < length {
            bytes.push(pick(&rng, &alphabet)?);
        }

        // Fisher-Yates so the guaranteed characters are not always at the front
        for i in (1..bytes.len()).rev() {
            let j = random_below(&rng, i + 1)?;
            bytes.swap(i, j);
        }

        let mut password = Zeroizing::new(String::with_capacity(length));
        password.extend(bytes.iter().copied().map(char::from));
        Ok(Self(password))
    }

    /// Borrow the password text
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Number of characters
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for generated passwords
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Characters that may appear in a generated password
    #[must_use]
    pub fn is_allowed_char(c: char) -> bool {
        u8::try_from(c).is_ok_and(|b| {
            LOWERCASE.contains(&b)
                || UPPERCASE.contains(&b)
                || DIGITS.contains(&b)
                || SYMBOLS.contains(&b)
        })
    }
}

impl fmt::Debug for OneTimePassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OneTimePassword([REDACTED])")
    }
}

fn pick(rng: &SystemRandom, alphabet: &[u8]) -> AppResult<u8> {
    let index = random_below(rng, alphabet.len())?;
    alphabet
        .get(index)
        .copied()
        .ok_or_else(|| AppError::internal("Random index outside alphabet"))
}

/// Uniform integer in `[0, bound)` by rejection sampling over `u32`
fn random_below(rng: &SystemRandom, bound: usize) -> AppResult<usize> {
    let bound = u32::try_from(bound)
        .ok()
        .filter(|b| *b > 0)
        .ok_or_else(|| AppError::internal("Random bound out of range"))?;
    let zone = u32::MAX - (u32::MAX % bound);

    loop {
        let mut buf = [0u8; 4];
        rng.fill(&mut buf)
            .map_err(|_| AppError::internal("System random source unavailable"))?;
        let value = u32::from_le_bytes(buf);
        if value < zone {
            return Ok((value % bound) as usize);
        }
    }
}
