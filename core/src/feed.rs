// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Read-only iCalendar feed projection.
//!
//! Renders a collection and its objects as one `VCALENDAR` document for
//! webcal subscribers. The output is a pure function of store state: same
//! collection, same objects, same bytes. Lines end with CRLF per RFC 5545.

use crate::collection::Collection;
use crate::datetime::format_ical;
use crate::object::CalendarObject;
use crate::types::ComponentKind;

const PRODID: &str = "-//kalends//calendar store//EN";

pub(crate) fn render(collection: &Collection, objects: &[CalendarObject]) -> String {
    let mut out = String::new();
    line(&mut out, "BEGIN:VCALENDAR");
    line(&mut out, "VERSION:2.0");
    prop(&mut out, "PRODID", PRODID);
    line(&mut out, "CALSCALE:GREGORIAN");
    prop(&mut out, "X-WR-CALNAME", &escape_text(&collection.name));
    if let Some(description) = &collection.description {
        prop(&mut out, "X-WR-CALDESC", &escape_text(description));
    }
    if let Some(timezone) = &collection.timezone {
        prop(&mut out, "X-WR-TIMEZONE", timezone);
    }

    for object in objects {
        render_object(&mut out, object);
    }

    line(&mut out, "END:VCALENDAR");
    out
}

fn render_object(out: &mut String, object: &CalendarObject) {
    let component = object.kind.as_str();
    prop(out, "BEGIN", component);
    prop(out, "UID", &escape_text(&object.uid));
    if let Some(start) = &object.start {
        prop(out, "DTSTART", &format_ical(start));
    }
    if let Some(end) = &object.end {
        // Todos carry their deadline as DUE rather than DTEND.
        let name = match object.kind {
            ComponentKind::Todo => "DUE",
            _ => "DTEND",
        };
        prop(out, name, &format_ical(end));
    }
    if let Some(summary) = &object.summary {
        prop(out, "SUMMARY", &escape_text(summary));
    }
    if let Some(description) = &object.description {
        prop(out, "DESCRIPTION", &escape_text(description));
    }
    prop(out, "SEQUENCE", &object.sequence.to_string());
    if let Some(status) = &object.status {
        prop(out, "STATUS", status.as_str());
    }
    prop(out, "END", component);
}

fn line(out: &mut String, s: &str) {
    out.push_str(s);
    out.push_str("\r\n");
}

fn prop(out: &mut String, name: &str, value: &str) {
    out.push_str(name);
    out.push(':');
    out.push_str(value);
    out.push_str("\r\n");
}

/// RFC 5545 TEXT escaping: backslash, semicolon and comma are
/// backslash-escaped, newlines become `\n`, bare carriage returns are
/// dropped.
fn escape_text(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            c => escaped.push(c),
        }
    }
    escaped
}
