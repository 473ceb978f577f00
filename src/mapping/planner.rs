//! Preference → `SolveRequest` and `SolveResponse` → [`SolveResult`].

use std::collections::HashMap;

use crate::mapping::{narrow, non_empty, MappingError};
use crate::model::{ScheduledCourse, SolveResult, UserPreference};
use crate::proto::planner as pb;

/// Build the planner request for a stored preference.
pub fn to_solve_request(pref: &UserPreference) -> Result<pb::SolveRequest, MappingError> {
    Ok(pb::SolveRequest {
        preference: Some(to_proto_preference(pref)?),
    })
}

pub fn to_proto_preference(pref: &UserPreference) -> Result<pb::UserPreference, MappingError> {
    let mut blacklisted_periods = HashMap::with_capacity(pref.blacklisted_periods.len());
    for (day, periods) in &pref.blacklisted_periods {
        let periods = periods
            .iter()
            .map(|&p| narrow(format!("blacklisted_periods.{day}"), p))
            .collect::<Result<Vec<_>, _>>()?;
        blacklisted_periods.insert(day.clone(), pb::PeriodList { periods });
    }

    Ok(pb::UserPreference {
        x: narrow("x", pref.x)?,
        y: narrow("y", pref.y)?,
        z: narrow("z", pref.z)?,
        min_credits: narrow("min_credits", pref.min_credits)?,
        max_credits: narrow("max_credits", pref.max_credits)?,
        blacklisted_periods,
    })
}

/// Inverse of [`to_proto_preference`].
pub fn from_proto_preference(pref: &pb::UserPreference) -> UserPreference {
    UserPreference {
        x: pref.x.into(),
        y: pref.y.into(),
        z: pref.z.into(),
        min_credits: pref.min_credits.into(),
        max_credits: pref.max_credits.into(),
        blacklisted_periods: pref
            .blacklisted_periods
            .iter()
            .map(|(day, list)| {
                (
                    day.clone(),
                    list.periods.iter().map(|&p| i64::from(p)).collect(),
                )
            })
            .collect(),
    }
}

pub fn from_solve_response(resp: pb::SolveResponse) -> SolveResult {
    SolveResult {
        status: resp.status,
        scheduled_courses: resp
            .scheduled_courses
            .into_iter()
            .map(from_scheduled_course)
            .collect(),
        total_credits: resp.total_credits.into(),
        error_message: non_empty(resp.error_message),
    }
}

fn from_scheduled_course(course: pb::ScheduledCourse) -> ScheduledCourse {
    ScheduledCourse {
        course_id: course.course_id,
        course_name: course.course_name,
        credits: course.credits.into(),
        day: course.day,
        period: course.period.into(),
        course_type: course.course_type,
    }
}
