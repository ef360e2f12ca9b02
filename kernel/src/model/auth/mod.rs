pub mod command;

/// Signed bearer token handed to the client at login and presented
/// on every authenticated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(pub String);
