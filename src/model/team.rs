use serde::Serialize;
use strum_macros::{EnumIter, EnumString};

/// A KBO club, identified on the wire by its Naver team code.
///
/// `Display` and `FromStr` use the code (`"HH"`, `"OB"`, ...); use
/// [`Team::display_name`] for the name written into output tables.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    EnumIter,
    EnumString,
    strum_macros::Display,
    strum_macros::IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Team {
    #[strum(serialize = "LG")]
    Lg,
    #[strum(serialize = "HH")]
    Hanwha,
    #[strum(serialize = "LT")]
    Lotte,
    #[strum(serialize = "HT")]
    Kia,
    #[strum(serialize = "SK")]
    Ssg,
    #[strum(serialize = "SS")]
    Samsung,
    #[strum(serialize = "KT")]
    Kt,
    #[strum(serialize = "NC")]
    Nc,
    #[strum(serialize = "OB")]
    Doosan,
    #[strum(serialize = "WO")]
    Kiwoom,
}

impl Team {
    /// Code expected by the schedule page's `teamCode` parameter.
    pub fn code(self) -> &'static str {
        self.into()
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Team::Lg => "LG",
            Team::Hanwha => "한화",
            Team::Lotte => "롯데",
            Team::Kia => "KIA",
            Team::Ssg => "SSG",
            Team::Samsung => "삼성",
            Team::Kt => "KT",
            Team::Nc => "NC",
            Team::Doosan => "두산",
            Team::Kiwoom => "키움",
        }
    }
}
