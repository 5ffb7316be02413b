//! Vocabulary of the GENESIS web service
//!
//! Every enum maps onto the exact string the web service expects in the query
//! string. Most of the vocabulary is German since the database is German first.
//! `FromStr` accepts the wire value as well as an English alias, case-insensitive,
//! which keeps command line parsing simple.

use serde::{Deserialize, Serialize};

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $wire:literal $(| $alias:literal)*
            ),+ $(,)?
        }
        default = $default:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// All variants in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The value sent to the web service
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim().to_lowercase();
                $(
                    if needle == $wire.to_lowercase()
                        || needle == stringify!($variant).to_lowercase()
                        $(|| needle == $alias)*
                    {
                        return Ok($name::$variant);
                    }
                )+
                let valid: Vec<&str> = $name::ALL.iter().map(|v| v.as_str()).collect();
                Err(format!(
                    "Invalid {}: '{}'. Valid options: {}",
                    stringify!($name),
                    s,
                    valid.join(", ")
                ))
            }
        }
    };
}

wire_enum! {
    /// Language of the textual content in responses
    Language {
        German => "de" | "german" | "deutsch",
        English => "en" | "english" | "englisch",
    }
    default = German
}

wire_enum! {
    /// Object categories searched by `find/find`
    Category {
        Tables => "tables" | "table",
        Statistics => "statistics" | "statistic",
        Cubes => "cubes" | "cube",
        Variables => "variables" | "variable",
        TimeSeries => "time_series" | "timeseries",
        All => "all",
    }
    default = All
}

wire_enum! {
    /// Kinds of jobs the database runs for an account
    JobType {
        All => "all",
        Import => "Import",
        Export => "Export",
        ValueRetrieval => "Werteabruf" | "value-retrieval",
        CalculateSumCubes => "Summenquader berechnen" | "calculate-sum-cubes",
        CleanupDataCubes => "Datenquader bereinigen" | "cleanup-data-cubes",
    }
    default = All
}

wire_enum! {
    /// Fields a job listing can be searched and sorted by
    JobCriteria {
        Code => "Code",
        Status => "Status",
        Type => "Auftragstyp" | "type",
        Time => "Zeitpunkt" | "time",
    }
    default = Code
}

wire_enum! {
    /// Object types reported by `catalogue/modifieddata`
    ObjectType {
        All => "Alle" | "all",
        Tables => "Tabellen" | "tables",
        Statistics => "Statistiken" | "statistics",
        StatisticUpdates => "StatistikUpdates" | "statistic-updates",
    }
    default = All
}

wire_enum! {
    /// Storage area of an object (`area` parameter)
    ObjectStorage {
        User => "Benutzer" | "user",
        Group => "Gruppe" | "group",
        Office => "Amt" | "office",
        Public => "Öffentlich" | "public" | "oeffentlich",
        All => "Alle" | "all",
    }
    default = All
}

wire_enum! {
    /// Fields a statistic listing can be searched and sorted by
    StatisticCriteria {
        Code => "Code",
        Content => "Inhalt" | "content",
    }
    default = Code
}

wire_enum! {
    /// Sort order of a table listing
    TableCriteria {
        Code => "Code",
        Top => "Top",
    }
    default = Code
}

wire_enum! {
    /// Fields value and variable listings can be searched and sorted by
    GenericCriteria {
        Code => "Code",
        Content => "Inhalt" | "content",
    }
    default = Code
}

wire_enum! {
    /// Variable types known to the database
    VariableType {
        All => "Alle" | "all",
        Classifying => "klassifizierend" | "classifying",
        Total => "insgesamt" | "total",
        Spatial => "räumlich" | "spatial" | "raeumlich",
        Factual => "sachlich" | "factual",
        Value => "wert" | "value",
        Temporal => "zeitlich" | "temporal",
        TimeIdentifying => "zeitidentifizierend" | "time-identifying",
    }
    default = All
}

wire_enum! {
    /// Chart types rendered by the `data/chart2*` methods
    ChartType {
        LineChart => "0" | "line",
        BarChart => "1" | "bar",
        PieChart => "2" | "pie",
        PointCloud => "3" | "scatter" | "points",
    }
    default = LineChart
}

wire_enum! {
    /// Resolution of rendered charts and maps (`zoom` parameter)
    ImageSize {
        /// 480x320 pixels
        Level0 => "0",
        /// 640x480 pixels
        Level1 => "1",
        /// 800x600 pixels
        Level2 => "2",
        /// 1024x768 pixels
        Level3 => "3",
    }
    default = Level3
}

wire_enum! {
    /// File formats offered by `data/tablefile` and `data/timeseriesfile`
    FileFormat {
        Csv => "csv",
        FlatCsv => "ffcsv" | "flat",
        Xlsx => "xlsx" | "excel",
    }
    default = Csv
}

impl ImageSize {
    /// Pixel dimensions (width, height) of the rendered image
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            ImageSize::Level0 => (480, 320),
            ImageSize::Level1 => (640, 480),
            ImageSize::Level2 => (800, 600),
            ImageSize::Level3 => (1024, 768),
        }
    }
}

impl FileFormat {
    /// File extension of downloads in this format
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Csv | FileFormat::FlatCsv => "csv",
            FileFormat::Xlsx => "xlsx",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values() {
        assert_eq!(Language::German.as_str(), "de");
        assert_eq!(JobType::ValueRetrieval.as_str(), "Werteabruf");
        assert_eq!(ObjectStorage::Public.as_str(), "Öffentlich");
        assert_eq!(VariableType::Spatial.to_string(), "räumlich");
        assert_eq!(ChartType::PieChart.as_str(), "2");
        assert_eq!(FileFormat::FlatCsv.as_str(), "ffcsv");
    }

    #[test]
    fn defaults_follow_the_service() {
        assert_eq!(Language::default(), Language::German);
        assert_eq!(Category::default(), Category::All);
        assert_eq!(ObjectStorage::default(), ObjectStorage::All);
        assert_eq!(ImageSize::default(), ImageSize::Level3);
        assert_eq!(ChartType::default(), ChartType::LineChart);
    }

    #[test]
    fn parsing_accepts_wire_values_and_aliases() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::English);
        assert_eq!("English".parse::<Language>().unwrap(), Language::English);
        assert_eq!("Tabellen".parse::<ObjectType>().unwrap(), ObjectType::Tables);
        assert_eq!("timeseries".parse::<Category>().unwrap(), Category::TimeSeries);
        assert_eq!("pie".parse::<ChartType>().unwrap(), ChartType::PieChart);
        assert_eq!("öffentlich".parse::<ObjectStorage>().unwrap(), ObjectStorage::Public);
        assert!("klingon".parse::<Language>().is_err());
    }

    #[test]
    fn parsing_accepts_variant_names() {
        macro_rules! round_trip {
            ($($enum:ty),+) => {$(
                for variant in <$enum>::ALL {
                    let name = format!("{:?}", variant);
                    assert_eq!(name.parse::<$enum>().unwrap(), *variant, "{}", name);
                    assert_eq!(name.to_uppercase().parse::<$enum>().unwrap(), *variant);
                }
            )+};
        }
        round_trip!(
            Language,
            Category,
            JobType,
            JobCriteria,
            ObjectType,
            ObjectStorage,
            StatisticCriteria,
            TableCriteria,
            GenericCriteria,
            VariableType,
            ChartType,
            ImageSize,
            FileFormat
        );
        assert_eq!("BarChart".parse::<ChartType>().unwrap(), ChartType::BarChart);
        assert_eq!("ValueRetrieval".parse::<JobType>().unwrap(), JobType::ValueRetrieval);
        assert_eq!("level0".parse::<ImageSize>().unwrap(), ImageSize::Level0);
    }

    #[test]
    fn deserializes_from_wire_value() {
        let language: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(language, Language::English);
    }
}
