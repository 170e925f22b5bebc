//! Synthetic credential generation.
//!
//! Values are plausible-looking, not security-grade. The random source is
//! injected so tests can pin outputs with a seeded RNG.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::core::models::{CredentialField, PasswordLength};

/// Domain appended to every generated email.
pub const EMAIL_DOMAIN: &str = "gmail.com";

/// Length of the random local part of generated emails.
pub const EMAIL_TOKEN_LEN: usize = 8;

/// Username numeric suffix is drawn from `0..USERNAME_SUFFIX_BOUND`.
pub const USERNAME_SUFFIX_BOUND: u32 = 1000;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Characters a generated password may contain.
pub const PASSWORD_ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*";

/// Word corpus for usernames.
pub const USERNAME_WORDS: [&str; 49] = [
    "red", "blue", "green", "yellow", "purple", "orange", "pink", "black", "white", // colors
    "cat", "dog", "bird", "fish", "lion", "tiger", "bear", "wolf", "fox", // animals
    "sun", "moon", "star", "cloud", "rain", "snow", "wind", "storm", // sky
    "tree", "flower", "river", "mountain", "ocean", "forest", "desert", // land
    "happy", "sad", "angry", "excited", "calm", "brave", "shy", "clever", // moods
    "swift", "strong", "gentle", "wild", "quiet", "loud", "bright", "dark",
];

/// Produces synthetic email, username and password strings.
#[derive(Debug, Clone)]
pub struct FieldGenerator<R = StdRng> {
    rng: R,
    password_length: PasswordLength,
}

impl FieldGenerator<StdRng> {
    /// Generator backed by OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Deterministic generator for reproducible output.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> FieldGenerator<R> {
    /// Wrap a random source using the default password length.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            password_length: PasswordLength::default(),
        }
    }

    /// Builder-style password length override.
    #[must_use]
    pub fn with_password_length(mut self, length: PasswordLength) -> Self {
        self.password_length = length;
        self
    }

    #[must_use]
    pub const fn password_length(&self) -> PasswordLength {
        self.password_length
    }

    pub fn set_password_length(&mut self, length: PasswordLength) {
        self.password_length = length;
    }

    /// `<8 base36 chars>@gmail.com`.
    pub fn generate_email(&mut self) -> String {
        let token: String = (0..EMAIL_TOKEN_LEN)
            .map(|_| char::from(BASE36[self.rng.gen_range(0..BASE36.len())]))
            .collect();
        format!("{token}@{EMAIL_DOMAIN}")
    }

    /// `<word><word><0-999>`. The two words may repeat.
    pub fn generate_username(&mut self) -> String {
        let first = USERNAME_WORDS[self.rng.gen_range(0..USERNAME_WORDS.len())];
        let second = USERNAME_WORDS[self.rng.gen_range(0..USERNAME_WORDS.len())];
        let number = self.rng.gen_range(0..USERNAME_SUFFIX_BOUND);
        format!("{first}{second}{number}")
    }

    /// Exactly `length` characters drawn uniformly from [`PASSWORD_ALPHABET`].
    pub fn generate_password(&mut self, length: PasswordLength) -> String {
        let alphabet = PASSWORD_ALPHABET.as_bytes();
        (0..length.get())
            .map(|_| char::from(alphabet[self.rng.gen_range(0..alphabet.len())]))
            .collect()
    }

    /// Generate one credential, using the configured password length.
    pub fn generate(&mut self, field: CredentialField) -> String {
        match field {
            CredentialField::Email => self.generate_email(),
            CredentialField::Username => self.generate_username(),
            CredentialField::Password => self.generate_password(self.password_length),
        }
    }

    /// Sixteen random bytes, used for account ids.
    pub(crate) fn random_bytes(&mut self) -> [u8; 16] {
        let mut bytes = [0u8; 16];
        self.rng.fill(&mut bytes);
        bytes
    }
}
