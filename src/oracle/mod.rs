//! Contract with the external thermodynamic primer-design oracle.
//!
//! The pipeline only ever talks to a [`PrimerOracle`]; [`Primer3Cli`] is the
//! production implementation backed by the `primer3_core` executable.

mod boulder;
mod error;
mod primer3;
mod request;
mod response;
#[cfg(test)]
mod scripted;

pub use boulder::BoulderRecord;
pub use error::OracleError;
pub use primer3::Primer3Cli;
pub use request::{OligoSettings, OracleRequest, PairSettings, Span};
pub use response::{OligoHit, OracleResponse, PrimerCandidate};
#[cfg(test)]
pub use scripted::ScriptedOracle;

pub trait PrimerOracle {
    fn design(&self, request: &OracleRequest) -> Result<OracleResponse, OracleError>;
}
