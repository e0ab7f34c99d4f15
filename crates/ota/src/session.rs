//! OTA session orchestration
//!
//! Drives a complete install or delete: build the APDU, wrap it in the
//! OTA envelope, fragment into SMS parts, and dispatch each part in index
//! order through the transport.

use otalink_apdu_core::ApduCommand;
use rand::Rng;

use crate::aid::Aid;
use crate::commands::{DeleteCommand, InstallCommand};
use crate::constants::sms;
use crate::envelope::{self, Operation};
use crate::fragment;
use crate::transport::SmsTransport;
use crate::{Error, Result};

/// Accepted MSISDN digit counts after normalization.
const MSISDN_LEN: std::ops::RangeInclusive<usize> = 4..=15;

/// Strip a leading `+` and any whitespace from an MSISDN.
pub fn normalize_msisdn(msisdn: &str) -> String {
    msisdn
        .trim()
        .trim_start_matches('+')
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Whether an MSISDN normalizes to 4-15 decimal digits.
pub fn validate_msisdn(msisdn: &str) -> bool {
    let normalized = normalize_msisdn(msisdn);
    MSISDN_LEN.contains(&normalized.len()) && normalized.chars().all(|c| c.is_ascii_digit())
}

/// OTA management session over an SMS transport.
#[derive(Debug)]
pub struct OtaSession<T: SmsTransport> {
    transport: T,
    reference: u8,
    max_part_size: usize,
}

impl<T: SmsTransport> OtaSession<T> {
    /// Create a session.
    ///
    /// The concatenation reference starts at a random value and increments
    /// (wrapping) per message, so consecutive messages to one SIM never
    /// share a reference.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            reference: rand::rng().random(),
            max_part_size: sms::MAX_SEGMENT_PAYLOAD,
        }
    }

    /// Pin the next concatenation reference, for reproducible sequences.
    pub const fn with_reference(mut self, reference: u8) -> Self {
        self.reference = reference;
        self
    }

    /// Override the per-part payload budget.
    pub const fn with_max_part_size(mut self, max_part_size: usize) -> Self {
        self.max_part_size = max_part_size;
        self
    }

    /// Establish the transport session.
    pub fn connect(&mut self) -> Result<()> {
        self.transport.connect()
    }

    /// Release the transport session.
    pub fn disconnect(&mut self) -> Result<()> {
        self.transport.disconnect()
    }

    /// Install an applet on the SIM at `destination`.
    ///
    /// Builds the INSTALL APDU, wraps it in the install envelope, and
    /// dispatches the resulting parts. Returns one message id per part.
    pub fn install_applet(
        &mut self,
        destination: &str,
        aid: &Aid,
        load_data: &[u8],
    ) -> Result<Vec<String>> {
        let apdu = InstallCommand::new(aid, load_data)?.to_bytes()?;
        let message = envelope::wrap(&apdu, Operation::Install)?;
        self.send_message(destination, &message)
    }

    /// Delete an applet from the SIM at `destination`.
    pub fn delete_applet(&mut self, destination: &str, aid: &Aid) -> Result<Vec<String>> {
        let apdu = DeleteCommand::new(aid)?.to_bytes()?;
        let message = envelope::wrap(&apdu, Operation::Delete)?;
        self.send_message(destination, &message)
    }

    /// Fragment and dispatch one OTA message, parts in index order.
    ///
    /// The destination is validated before any part is dispatched. A send
    /// failure at part *k* aborts parts *k+1..n* and propagates the error;
    /// releasing the transport is the caller's job (see
    /// [`crate::operations::with_session`]).
    pub fn send_message(&mut self, destination: &str, message: &[u8]) -> Result<Vec<String>> {
        if !validate_msisdn(destination) {
            return Err(Error::InvalidDestination(destination.to_string()));
        }
        let destination = normalize_msisdn(destination);

        let reference = self.next_reference();
        let parts = fragment::fragment(message, self.max_part_size, reference)?;

        let mut message_ids = Vec::with_capacity(parts.len());
        for part in &parts {
            tracing::debug!(
                reference,
                index = part.index(),
                total = part.total(),
                "dispatching OTA part"
            );
            message_ids.push(self.transport.send(&destination, &part.to_bytes())?);
        }
        Ok(message_ids)
    }

    fn next_reference(&mut self) -> u8 {
        let reference = self.reference;
        self.reference = self.reference.wrapping_add(1);
        reference
    }

    /// The underlying transport.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutable access to the underlying transport.
    pub const fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}
