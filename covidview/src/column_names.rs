//! This module stores the column names read from the source dataset and the names of the
//! columns derived from them. Note that the source names must be kept in sync with the
//! upstream CSV header!

pub const LOCATION: &str = "location";
pub const DATE: &str = "date";

pub const TOTAL_CASES: &str = "total_cases";
pub const NEW_CASES: &str = "new_cases";
pub const TOTAL_DEATHS: &str = "total_deaths";
pub const NEW_DEATHS: &str = "new_deaths";

pub const TOTAL_VACCINATIONS: &str = "total_vaccinations";
pub const PEOPLE_VACCINATED: &str = "people_vaccinated";
pub const PEOPLE_FULLY_VACCINATED: &str = "people_fully_vaccinated";

pub const CASE_FATALITY_RATE: &str = "case_fatality_rate";
pub const VACCINATED_PCT: &str = "vaccinated_pct";
pub const FULLY_VACCINATED_PCT: &str = "fully_vaccinated_pct";

/// Columns kept by the projection, in output order.
pub const REQUIRED: [&str; 9] = [
    LOCATION,
    DATE,
    TOTAL_CASES,
    NEW_CASES,
    TOTAL_DEATHS,
    NEW_DEATHS,
    TOTAL_VACCINATIONS,
    PEOPLE_VACCINATED,
    PEOPLE_FULLY_VACCINATED,
];

/// Count columns, stored as `Float64` after projection.
pub const COUNTS: [&str; 7] = [
    TOTAL_CASES,
    NEW_CASES,
    TOTAL_DEATHS,
    NEW_DEATHS,
    TOTAL_VACCINATIONS,
    PEOPLE_VACCINATED,
    PEOPLE_FULLY_VACCINATED,
];

/// Columns reported for the latest row of a country.
pub const LATEST: [&str; 5] = [
    DATE,
    TOTAL_CASES,
    TOTAL_DEATHS,
    PEOPLE_VACCINATED,
    PEOPLE_FULLY_VACCINATED,
];
