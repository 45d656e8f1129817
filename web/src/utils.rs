use pairs_core::{KeyValueStore, StoreError};
use yew::prelude::*;

/// `window.localStorage`, or nothing when the browser refuses to hand it out.
#[derive(Clone, Debug)]
pub(crate) struct BrowserStore {
    storage: Option<web_sys::Storage>,
}

impl BrowserStore {
    pub(crate) fn new() -> Self {
        let storage = match gloo::utils::window().local_storage() {
            Ok(storage) => storage,
            Err(err) => {
                log::warn!("local storage unavailable: {:?}", err);
                None
            }
        };
        Self { storage }
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = self.storage.as_ref().ok_or(StoreError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|err| StoreError::Rejected(format!("{:?}", err)))
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct ModalProps {
    #[prop_or_default]
    pub children: Html,
}

/// Helper component to attatch the contents into the document.body instead of in the place where it's used.
#[function_component]
pub(crate) fn Modal(props: &ModalProps) -> Html {
    let modal_host = gloo::utils::body();
    create_portal(props.children.clone(), modal_host.into())
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    (0..8).fold(0u64, |seed, _| (seed << 8) | u64::from((256. * random()) as u8))
}
