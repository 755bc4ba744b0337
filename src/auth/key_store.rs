use keyring::Entry;

const SERVICE: &str = "breachcheck";
const ACCOUNT: &str = "hibp";

/// Persist the API key under the `breachcheck`/`hibp` keyring entry.
pub fn save_key(api_key: &str) -> Result<(), keyring::Error> {
    let entry = Entry::new(SERVICE, ACCOUNT)?;
    entry.set_password(api_key)
}

/// `Ok(None)` when no key has been stored yet.
pub fn load_key() -> Result<Option<String>, keyring::Error> {
    let entry = Entry::new(SERVICE, ACCOUNT)?;
    match entry.get_password() {
        Ok(key) => Ok(Some(key)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Remove the stored key. Errors with `NoEntry` if nothing was saved.
pub fn delete_key() -> Result<(), keyring::Error> {
    let entry = Entry::new(SERVICE, ACCOUNT)?;
    entry.delete_password()
}

/// Where a prompted key is looked up and remembered between runs.
pub trait KeyStore {
    fn load(&self) -> Result<Option<String>, keyring::Error>;
    fn save(&self, api_key: &str) -> Result<(), keyring::Error>;
}

/// The OS keyring.
pub struct SystemKeyring;

impl KeyStore for SystemKeyring {
    fn load(&self) -> Result<Option<String>, keyring::Error> {
        load_key()
    }

    fn save(&self, api_key: &str) -> Result<(), keyring::Error> {
        save_key(api_key)
    }
}
