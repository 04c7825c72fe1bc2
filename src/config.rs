use serde::{Deserialize, Serialize};

use crate::file;
use crate::session::Location;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub gym_first_rest_secs: u32,
    pub gym_rest_secs: u32,
    pub home_rest_secs: u32,
    pub tick_millis: u64,
    pub notify_message: String,
    pub notify_command: Option<Vec<String>>,
    pub socket: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gym_first_rest_secs: 90,
            gym_rest_secs: 60,
            home_rest_secs: 45,
            tick_millis: 1000,
            notify_message: String::from("Time to start your next set."),
            notify_command: None,
            socket: None,
        }
    }
}

impl Config {
    pub fn load(path: Option<&str>) -> Self {
        let config = match path {
            Some(path) => match file::read_json(path) {
                Ok(config) => config,
                Err(err) => {
                    tracing::warn!("could not read config {}: {}", path, err);
                    Config::default()
                }
            },
            None => Config::default(),
        };
        config.sanitized()
    }

    // A zero tick period would freeze every countdown.
    fn sanitized(mut self) -> Self {
        if self.tick_millis == 0 {
            tracing::warn!("tick_millis 0 is unusable, using 1000");
            self.tick_millis = 1000;
        }
        self
    }

    // The first exercise of a gym session gets the long rest, everything at
    // home gets the short one.
    pub fn rest_seconds(&self, location: Location, first_exercise: bool) -> u32 {
        match location {
            Location::Gym if first_exercise => self.gym_first_rest_secs,
            Location::Gym => self.gym_rest_secs,
            Location::Home => self.home_rest_secs,
        }
    }
}
