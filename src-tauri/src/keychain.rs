use keyring::Entry;
use log::{debug, error, info};
use secrecy::{ExposeSecret, SecretString};

const SERVICE: &str = "com.aimodelplayground.app";
const ACCOUNT: &str = "hub_api_token";

pub fn save_hub_token(token: &SecretString) -> Result<(), keyring::Error> {
    let entry = Entry::new(SERVICE, ACCOUNT)?;

    match entry.set_password(token.expose_secret()) {
        Ok(()) => {
            info!("Hub token saved to keychain");
            Ok(())
        }
        Err(e) => {
            error!("Failed to save hub token: {:?}", e);
            Err(e)
        }
    }
}

pub fn load_hub_token() -> Result<Option<SecretString>, keyring::Error> {
    debug!("Loading hub token (service: '{}', account: '{}')", SERVICE, ACCOUNT);

    let entry = Entry::new(SERVICE, ACCOUNT)?;

    match entry.get_password() {
        Ok(password) => {
            debug!("Hub token loaded (length: {})", password.len());
            Ok(Some(SecretString::from(password)))
        }
        Err(keyring::Error::NoEntry) => {
            debug!("No hub token in keychain");
            Ok(None)
        }
        Err(e) => {
            error!("Error loading hub token: {:?}", e);
            Err(e)
        }
    }
}

pub fn delete_hub_token() -> Result<(), keyring::Error> {
    let entry = Entry::new(SERVICE, ACCOUNT)?;

    match entry.delete_credential() {
        Ok(()) => {
            info!("Hub token deleted");
            Ok(())
        }
        Err(keyring::Error::NoEntry) => {
            debug!("No hub token to delete");
            Ok(())
        }
        Err(e) => {
            error!("Error deleting hub token: {:?}", e);
            Err(e)
        }
    }
}
