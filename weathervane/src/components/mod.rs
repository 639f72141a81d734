pub mod backdrop_layer;
pub mod city_input;
pub mod error_panel;
pub mod help_bar;
pub mod result_panel;
pub mod splash;
pub mod submit_button;
pub mod weather_screen;

pub use weathervane_core::Component;

pub use backdrop_layer::{BackdropLayer, BackdropLayerProps};
pub use city_input::{CityInput, CityInputProps};
pub use error_panel::{ErrorPanel, ErrorPanelProps, ERROR_ICON};
pub use help_bar::{HelpBar, HelpBarProps};
pub use result_panel::{format_local_time, format_time_in, ResultPanel, ResultPanelProps};
pub use splash::{Splash, SplashProps, APP_TITLE};
pub use submit_button::{spinner, SubmitButton, SubmitButtonProps, SPINNERS};
pub use weather_screen::{WeatherScreen, WeatherScreenProps, PLACEHOLDER, SUBMIT_LABEL};
