use exaroton_protocol::AccountData;

/// The account the API token belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    name: String,
    email: String,
    verified: bool,
    credits: f64,
}

impl Account {
    pub(crate) fn from_data(data: AccountData) -> Self {
        Self {
            name: data.name,
            email: data.email,
            verified: data.verified,
            credits: data.credits,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Whether the email address has been verified.
    pub fn is_verified(&self) -> bool {
        self.verified
    }

    /// Credit balance.
    pub fn credits(&self) -> f64 {
        self.credits
    }
}
