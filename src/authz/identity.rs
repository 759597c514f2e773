use uuid::Uuid;

/// What the external identity provider tells us about the caller. The core
/// never mutates this; it is an input to policy evaluation.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: Uuid,
    pub name: String,
    pub role: Option<String>,
    pub is_authenticated: bool,
}

impl Identity {
    pub fn authenticated(id: Uuid, name: impl Into<String>, role: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            is_authenticated: true,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            id: Uuid::nil(),
            name: String::new(),
            role: None,
            is_authenticated: false,
        }
    }
}
