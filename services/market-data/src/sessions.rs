//! Shanghai Gold Exchange trading calendar.
//!
//! Sessions in Beijing time (UTC+8), Monday to Friday:
//! - day: 09:00–11:30 and 13:30–15:30
//! - night: 20:00–02:30, the after-midnight part running Tuesday to Saturday
//!
//! Exchange holidays are not modelled.

use chrono::{Datelike, DateTime, FixedOffset, NaiveTime, Offset, Timelike, Utc, Weekday};
use types::snapshot::{MarketStatus, Session};

const BEIJING_OFFSET_SECS: i32 = 8 * 3600;

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

fn beijing_offset() -> FixedOffset {
    FixedOffset::east_opt(BEIJING_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

fn is_weekday(day: Weekday) -> bool {
    !matches!(day, Weekday::Sat | Weekday::Sun)
}

/// Session in force at `now`.
pub fn session_at(now: DateTime<Utc>) -> Session {
    let local = now.with_timezone(&beijing_offset());
    let day = local.weekday();
    let t = local.time();

    let in_day_session =
        (t >= hm(9, 0) && t < hm(11, 30)) || (t >= hm(13, 30) && t < hm(15, 30));
    if is_weekday(day) && in_day_session {
        return Session::Day;
    }
    if is_weekday(day) && t >= hm(20, 0) {
        return Session::Night;
    }
    // Early-morning tail of the previous weekday's night session.
    if is_weekday(day.pred()) && t < hm(2, 30) {
        return Session::Night;
    }
    Session::Closed
}

pub fn market_status(now: DateTime<Utc>) -> MarketStatus {
    let session = session_at(now);
    let local = now.with_timezone(&beijing_offset());
    MarketStatus {
        is_open: session != Session::Closed,
        session,
        beijing_time: format!("{:02}:{:02}", local.hour(), local.minute()),
    }
}
