mod interceptor;
mod key_combo;

pub use {
    interceptor::{InterceptAction, Interceptor},
    key_combo::{KeyCombo, KeyEvent, KeyId, KeyTransition},
};
