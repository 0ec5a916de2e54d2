use crate::state::form::{LoginForm, RegisterField, RegisterForm};
use mastery_auth::RegistrationForm;
use secrecy::SecretString;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Check the login form and return the credentials to submit.
pub fn validate_login(form: &LoginForm) -> Result<(String, SecretString), String> {
    if form.username.is_blank() {
        return Err("Username is required".to_string());
    }
    if form.password.value().is_empty() {
        return Err("Password is required".to_string());
    }

    Ok((form.username.trimmed().to_string(), form.password.to_secret()))
}

/// Check the registration form and build the request payload.
///
/// Errors are reported one at a time, in field order.
pub fn validate_registration(form: &RegisterForm) -> Result<RegistrationForm, String> {
    for field in RegisterField::ALL {
        if field == RegisterField::DisplayName {
            continue;
        }
        if form.field(field).is_blank() {
            return Err(format!("{} is required", field.label()));
        }
    }

    validate_email(form.email.trimmed())?;

    if form.password.value().chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ));
    }

    if form.password.value() != form.confirm_password.value() {
        return Err("Passwords do not match".to_string());
    }

    let display_name = Some(form.display_name.trimmed())
        .filter(|name| !name.is_empty())
        .map(str::to_string);

    Ok(RegistrationForm {
        username: form.username.trimmed().to_string(),
        email: form.email.trimmed().to_string(),
        password: form.password.to_secret(),
        password_confirmation: form.confirm_password.to_secret(),
        first_name: form.first_name.trimmed().to_string(),
        last_name: form.last_name.trimmed().to_string(),
        display_name,
    })
}

fn validate_email(email: &str) -> Result<(), String> {
    let invalid = || Err("Enter a valid email address".to_string());

    let Some((local, domain)) = email.split_once('@') else {
        return invalid();
    };
    if local.is_empty() || domain.contains('@') || email.contains(char::is_whitespace) {
        return invalid();
    }

    let Some((host, tld)) = domain.rsplit_once('.') else {
        return invalid();
    };
    if host.is_empty() || tld.is_empty() {
        return invalid();
    }

    Ok(())
}
