//! Document submission path: encoding, transport, and orchestration.

mod client;
mod document;
mod encoder;
mod transport;

pub use client::{RegistrationClient, SubmissionHandle};
pub use document::{Document, Product};
pub use encoder::{DocumentEncoder, JsonEncoder};
pub use transport::{HttpTransport, SubmitRequest, SubmitStatus, Transport, SIGNATURE_HEADER};
