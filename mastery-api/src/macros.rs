/// Builder-style setters for request payloads.
macro_rules! setter {
    ($field:ident : $ty:ty) => {
        pub fn $field<T>(mut self, $field: T) -> Self
        where
            T: Into<$ty>,
        {
            self.$field = $field.into();
            self
        }
    };

    (opt $field:ident : $ty:ty) => {
        pub fn $field<T>(mut self, $field: T) -> Self
        where
            T: Into<$ty>,
        {
            self.$field = Some($field.into());
            self
        }
    };

    // Secrets only ever enter a request through this arm so they are never
    // held as a plain `String`.
    (secret $field:ident) => {
        pub fn $field<T>(mut self, $field: T) -> Self
        where
            T: Into<String>,
        {
            self.$field = secrecy::SecretString::from($field.into());
            self
        }
    };
}

pub(crate) use setter;
