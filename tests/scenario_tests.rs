//! End-to-end scenario with the operating-system provider and the full
//! 600,000-round derivation.

use heirvault::crypto::{IV_LEN, KEY_LEN, SALT_LEN, TAG_LEN};
use heirvault::errors::HeirVaultError;
use heirvault::sealing::{
    activation_request, decode_text, open_secret, seal_secret, ActivationVerifier, StoredSecret,
};

#[test]
fn owner_seals_and_beneficiary_recovers() {
    let secret = b"my bank password is 1234";
    let payload = seal_secret(secret, "CorrectHorse9!").expect("seal");

    // The backend sees exactly five opaque fields.
    let json = payload.to_json().unwrap();
    let body: serde_json::Value = serde_json::from_str(&json).unwrap();
    let mut keys: Vec<&str> = body
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        [
            "encryptedDek",
            "encryptedSecret",
            "passwordHashCr",
            "saltCr",
            "saltKek"
        ]
    );
    assert!(!json.contains("my bank password"));

    let field = |name: &str| decode_text(body[name].as_str().unwrap()).unwrap().len();
    assert_eq!(field("encryptedSecret"), IV_LEN + secret.len() + TAG_LEN);
    assert_eq!(field("encryptedDek"), IV_LEN + KEY_LEN + TAG_LEN);
    assert_eq!(field("saltKek"), SALT_LEN);
    assert_eq!(field("saltCr"), SALT_LEN);
    assert_eq!(field("passwordHashCr"), KEY_LEN);

    // Recovery only needs the three stored fields.
    let stored = StoredSecret::from_json(&json).unwrap();
    let recovered = open_secret("CorrectHorse9!", &stored).expect("open");
    assert_eq!(recovered.as_slice(), secret);

    let err = open_secret("WrongPassword", &stored).unwrap_err();
    assert!(matches!(err, HeirVaultError::AuthenticationFailure));

    // Activation proves the password against the stored verifier.
    let request = activation_request("secret-1", "CorrectHorse9!", payload.salt_cr()).unwrap();
    let verifier = ActivationVerifier::new(payload.password_hash_cr()).unwrap();
    assert!(verifier.matches(&request.client_hash).unwrap());
}
