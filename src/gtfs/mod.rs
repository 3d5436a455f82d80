use csv::Reader;
use serde::de::DeserializeOwned;
use std::{
    collections::HashSet,
    fs,
    io::{self, Read},
    path::Path,
};
use thiserror::Error;
use tracing::debug;

mod config;
pub mod models;
pub use config::*;
use models::*;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Could not find file with name: {0}")]
    FileNotFound(String),
}

/// The raw feed entities the engine consumes, as loaded into memory.
#[derive(Default, Debug)]
pub struct Feed {
    pub agencies: Vec<GtfsAgency>,
    pub routes: Vec<GtfsRoute>,
    pub stops: Vec<GtfsStop>,
    pub trips: Vec<GtfsTrip>,
    pub stop_times: Vec<GtfsStopTime>,
    pub calendars: Vec<GtfsCalendar>,
    pub calendar_dates: Vec<GtfsCalendarDate>,
}

#[derive(Default, Debug)]
pub struct FeedLoader {
    feed: Feed,
    config: Config,
}

impl FeedLoader {
    pub fn new(config: self::Config) -> Self {
        Self {
            feed: Default::default(),
            config,
        }
    }

    /// Reads every known table out of the zip archive into memory.
    /// The calendar tables are optional on their own, but at least one of
    /// them has to be present.
    pub fn load_from_zip<P: AsRef<Path>>(mut self, path: P) -> Result<Self, self::Error> {
        let file = fs::File::open(path)?;
        let mut archive = zip::ZipArchive::new(file)?;
        let mut seen: HashSet<String> = HashSet::new();
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let name = file.name().to_string();
            match name.as_str() {
                val if val == self.config.agency_path => {
                    parse_csv(&mut self.feed.agencies, &mut file)?
                }
                val if val == self.config.routes_path => {
                    parse_csv(&mut self.feed.routes, &mut file)?
                }
                val if val == self.config.stops_path => parse_csv(&mut self.feed.stops, &mut file)?,
                val if val == self.config.trips_path => parse_csv(&mut self.feed.trips, &mut file)?,
                val if val == self.config.stop_times_path => {
                    parse_csv(&mut self.feed.stop_times, &mut file)?
                }
                val if val == self.config.calendar_path => {
                    parse_csv(&mut self.feed.calendars, &mut file)?
                }
                val if val == self.config.calendar_dates_path => {
                    parse_csv(&mut self.feed.calendar_dates, &mut file)?
                }
                _ => {
                    debug!("Skipping unknown feed file {name}");
                    continue;
                }
            };
            seen.insert(name);
        }

        for required in [
            &self.config.agency_path,
            &self.config.routes_path,
            &self.config.stops_path,
            &self.config.trips_path,
            &self.config.stop_times_path,
        ] {
            if !seen.contains(required.as_str()) {
                return Err(self::Error::FileNotFound(required.clone()));
            }
        }
        if !seen.contains(self.config.calendar_path.as_str())
            && !seen.contains(self.config.calendar_dates_path.as_str())
        {
            return Err(self::Error::FileNotFound(self.config.calendar_path.clone()));
        }
        Ok(self)
    }

    pub fn feed(&self) -> &Feed {
        &self.feed
    }

    pub fn into_feed(self) -> Feed {
        self.feed
    }
}

fn parse_csv<R, T>(buf: &mut Vec<T>, reader: &mut R) -> Result<(), self::Error>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut rdr = Reader::from_reader(reader);
    for result in rdr.deserialize() {
        let record: T = result?;
        buf.push(record);
    }
    Ok(())
}
