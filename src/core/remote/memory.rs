//! In-memory remote.
//!
//! Holds variables in a list, records every call, and fails selected calls
//! on demand. Used to exercise reconciliation without a GitLab server.

use std::cell::RefCell;

use super::Remote;
use crate::core::domain::{ProjectId, Variable, VariableId};
use crate::error::{RemoteError, Result};

/// A call made against [`Memory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Find(VariableId),
    Create(VariableId),
    Update(VariableId),
    Delete(VariableId),
}

impl Call {
    fn method(&self) -> &'static str {
        match self {
            Call::List | Call::Find(_) => "GET",
            Call::Create(_) => "POST",
            Call::Update(_) => "PUT",
            Call::Delete(_) => "DELETE",
        }
    }
}

/// Remote backed by a `Vec<Variable>`.
#[derive(Debug, Default)]
pub struct Memory {
    variables: RefCell<Vec<Variable>>,
    calls: RefCell<Vec<Call>>,
    failures: RefCell<Vec<Call>>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remote pre-populated with `variables`, in list order.
    pub fn with_variables(variables: Vec<Variable>) -> Self {
        Self {
            variables: RefCell::new(variables),
            ..Self::default()
        }
    }

    /// Make `call` fail with a server error.
    pub fn fail_on(&self, call: Call) {
        self.failures.borrow_mut().push(call);
    }

    /// Calls made so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Current stored variables.
    pub fn variables(&self) -> Vec<Variable> {
        self.variables.borrow().clone()
    }

    fn record(&self, call: Call) -> Result<()> {
        self.calls.borrow_mut().push(call.clone());
        if self.failures.borrow().contains(&call) {
            return Err(error(&call, "500 Internal Server Error"));
        }
        Ok(())
    }

    fn position(&self, key: &str, scope: &str) -> Option<usize> {
        self.variables
            .borrow()
            .iter()
            .position(|v| v.key == key && v.environment_scope == scope)
    }
}

fn error(call: &Call, reason: &str) -> crate::error::Error {
    RemoteError::Request {
        method: call.method(),
        url: format!("memory://{:?}", call),
        reason: reason.to_string(),
    }
    .into()
}

fn id(key: &str, scope: &str) -> VariableId {
    VariableId {
        key: key.to_string(),
        environment_scope: scope.to_string(),
    }
}

impl Remote for Memory {
    fn list_variables(&self, _project: ProjectId) -> Result<Vec<Variable>> {
        self.record(Call::List)?;
        Ok(self.variables())
    }

    fn find_variable(
        &self,
        _project: ProjectId,
        key: &str,
        scope: &str,
    ) -> Result<Option<Variable>> {
        self.record(Call::Find(id(key, scope)))?;
        Ok(self
            .position(key, scope)
            .map(|i| self.variables.borrow()[i].clone()))
    }

    fn create_variable(&self, _project: ProjectId, variable: &Variable) -> Result<()> {
        let call = Call::Create(variable.id());
        self.record(call.clone())?;
        if self
            .position(&variable.key, &variable.environment_scope)
            .is_some()
        {
            return Err(error(&call, "400 Bad Request: key has already been taken"));
        }
        self.variables.borrow_mut().push(variable.clone());
        Ok(())
    }

    fn update_variable(&self, _project: ProjectId, variable: &Variable) -> Result<()> {
        let call = Call::Update(variable.id());
        self.record(call.clone())?;
        match self.position(&variable.key, &variable.environment_scope) {
            Some(i) => {
                self.variables.borrow_mut()[i] = variable.clone();
                Ok(())
            }
            None => Err(error(&call, "404 Variable Not Found")),
        }
    }

    fn delete_variable(&self, _project: ProjectId, key: &str, scope: &str) -> Result<()> {
        let call = Call::Delete(id(key, scope));
        self.record(call.clone())?;
        match self.position(key, scope) {
            Some(i) => {
                self.variables.borrow_mut().remove(i);
                Ok(())
            }
            None => Err(error(&call, "404 Variable Not Found")),
        }
    }
}
