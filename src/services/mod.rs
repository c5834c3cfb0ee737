pub mod weather;

pub use weather::{FixedWeatherProvider, WeatherApiProvider, WeatherObservation, WeatherProvider};
