//! Event.

use serde_json::Value;

use sdval_core::Issue;
use sdval_engine::conditions::mentions;
use sdval_engine::{condition, Check, Condition, RuleContext, RuleSet, Subject};

const ONLINE_ATTENDANCE_MODES: [&str; 2] = ["OnlineEventAttendanceMode", "MixedEventAttendanceMode"];

/// Name, start date and a place to attend (physical or online).
#[derive(Debug, Clone, Copy, Default)]
pub struct EventRuleSet;

impl RuleSet for EventRuleSet {
    fn name(&self) -> &'static str {
        "event"
    }

    fn conditions<'c>(&self, ctx: &'c RuleContext<'_>, _entity: &Value) -> Vec<Condition<'c>> {
        vec![
            ctx.required("name", Check::Any),
            ctx.required("startDate", Check::Date),
            condition(move |subject: Subject<'_>| location_or_attendance_mode(ctx, subject.entity).into()),
            ctx.recommended("description", Check::Any),
            ctx.recommended("endDate", Check::Date),
            ctx.recommended("eventAttendanceMode", Check::Any),
            ctx.recommended("eventStatus", Check::Any),
            ctx.recommended("image", Check::ArrayOrObject),
            ctx.recommended("offers", Check::ArrayOrObject),
            ctx.recommended("organizer", Check::Object),
            ctx.recommended("performer", Check::ArrayOrObject),
        ]
    }
}

fn location_or_attendance_mode(ctx: &RuleContext<'_>, entity: &Value) -> Option<Issue> {
    let has_location = !matches!(entity.get("location"), None | Some(Value::Null));
    let mode = entity.get("eventAttendanceMode");
    let online = ONLINE_ATTENDANCE_MODES.iter().any(|m| mentions(mode, m));
    if has_location || online {
        return None;
    }
    Some(
        ctx.error(
            "Either \"location\" or online \"eventAttendanceMode\" is required",
            &["location", "eventAttendanceMode"],
        )
        .with_field_name("location"),
    )
}
