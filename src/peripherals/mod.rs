mod button;
pub mod push_button;

pub use button::*;
pub use push_button::{
    ButtonEvent, ConfigError, Dispatcher, NoObserver, Observer, PushButtonConfig,
    PushButtonState, Sampler,
};
