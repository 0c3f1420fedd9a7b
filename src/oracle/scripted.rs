use super::{OracleError, OracleRequest, OracleResponse, PrimerOracle};
use std::cell::RefCell;

type Responder = dyn Fn(&OracleRequest) -> Result<OracleResponse, OracleError>;

/// In-memory oracle answering from a closure and recording every request.
pub struct ScriptedOracle {
    responder: Box<Responder>,
    requests: RefCell<Vec<OracleRequest>>,
}

impl ScriptedOracle {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&OracleRequest) -> Result<OracleResponse, OracleError> + 'static,
    {
        Self {
            responder: Box::new(responder),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<OracleRequest> {
        self.requests.borrow().clone()
    }
}

impl PrimerOracle for ScriptedOracle {
    fn design(&self, request: &OracleRequest) -> Result<OracleResponse, OracleError> {
        self.requests.borrow_mut().push(request.clone());
        (self.responder)(request)
    }
}
