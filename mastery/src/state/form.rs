use secrecy::SecretString;
use std::fmt;

/// Single-line text input. Masked fields never print their contents.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    masked: bool,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn masked() -> Self {
        Self {
            value: String::new(),
            masked: true,
        }
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            masked: false,
        }
    }

    pub fn push(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn pop(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    pub fn is_masked(&self) -> bool {
        self.masked
    }

    /// What the screen shows: the text, or one bullet per character.
    pub fn display(&self) -> String {
        if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    pub fn to_secret(&self) -> SecretString {
        SecretString::from(self.value.clone())
    }
}

impl fmt::Debug for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.masked {
            write!(f, "TextField([REDACTED])")
        } else {
            write!(f, "TextField({:?})", self.value)
        }
    }
}

/// Focusable fields of the login form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

impl LoginField {
    pub fn next(self) -> Self {
        match self {
            Self::Username => Self::Password,
            Self::Password => Self::Username,
        }
    }

    pub fn previous(self) -> Self {
        self.next()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Username => "Username",
            Self::Password => "Password",
        }
    }
}

/// Focusable fields of the registration form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegisterField {
    #[default]
    Username,
    Email,
    FirstName,
    LastName,
    DisplayName,
    Password,
    ConfirmPassword,
}

impl RegisterField {
    pub const ALL: [RegisterField; 7] = [
        Self::Username,
        Self::Email,
        Self::FirstName,
        Self::LastName,
        Self::DisplayName,
        Self::Password,
        Self::ConfirmPassword,
    ];

    fn position(self) -> usize {
        Self::ALL
            .iter()
            .position(|field| *field == self)
            .unwrap_or_default()
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Username => "Username",
            Self::Email => "Email",
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::DisplayName => "Display name (optional)",
            Self::Password => "Password",
            Self::ConfirmPassword => "Confirm password",
        }
    }

    pub fn is_last(self) -> bool {
        self == Self::ConfirmPassword
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: TextField,
    pub password: TextField,
    pub focus: LoginField,
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            username: TextField::new(),
            password: TextField::masked(),
            focus: LoginField::default(),
        }
    }

    pub fn focused_mut(&mut self) -> &mut TextField {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub username: TextField,
    pub email: TextField,
    pub first_name: TextField,
    pub last_name: TextField,
    pub display_name: TextField,
    pub password: TextField,
    pub confirm_password: TextField,
    pub focus: RegisterField,
}

impl RegisterForm {
    pub fn new() -> Self {
        Self {
            password: TextField::masked(),
            confirm_password: TextField::masked(),
            ..Default::default()
        }
    }

    pub fn field(&self, field: RegisterField) -> &TextField {
        match field {
            RegisterField::Username => &self.username,
            RegisterField::Email => &self.email,
            RegisterField::FirstName => &self.first_name,
            RegisterField::LastName => &self.last_name,
            RegisterField::DisplayName => &self.display_name,
            RegisterField::Password => &self.password,
            RegisterField::ConfirmPassword => &self.confirm_password,
        }
    }

    pub fn focused_mut(&mut self) -> &mut TextField {
        match self.focus {
            RegisterField::Username => &mut self.username,
            RegisterField::Email => &mut self.email,
            RegisterField::FirstName => &mut self.first_name,
            RegisterField::LastName => &mut self.last_name,
            RegisterField::DisplayName => &mut self.display_name,
            RegisterField::Password => &mut self.password,
            RegisterField::ConfirmPassword => &mut self.confirm_password,
        }
    }
}
