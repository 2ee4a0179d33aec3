/// Table of extracted records

use js_sys::Date;
use patternfly_yew::prelude::*;
use wasm_bindgen::JsValue;
use yew::prelude::*;

use crate::display::{
    display_host, extraction_count, feature_tags, normalize_timestamp, or_placeholder,
    truncate_description,
};
use crate::record::ExtractionRecord;

#[derive(Properties, PartialEq)]
pub struct DataTableProps {
    pub records: Vec<ExtractionRecord>,
    #[prop_or(false)]
    pub is_loading: bool,
}

#[function_component(DataTable)]
pub fn data_table(props: &DataTableProps) -> Html {
    if props.is_loading {
        return html! {
            <div class="table-card">
                <div class="loading-text-center">
                    <Spinner />
                    <p class="loading-text">{"Loading extractions..."}</p>
                </div>
            </div>
        };
    }

    if props.records.is_empty() {
        return html! {
            <div class="table-card">
                <div class="empty-state">
                    <h3>{"No extractions yet"}</h3>
                    <p class="empty-state-hint">{"Extract data from a webpage to see results here"}</p>
                </div>
            </div>
        };
    }

    html! {
        <div class="table-card">
            <div class="header">
                <div>
                    <h2 class="stats-title">{"Extracted Data"}</h2>
                    <p class="table-count">{extraction_count(props.records.len())}</p>
                </div>
                <span class="live-indicator">{"Live updates"}</span>
            </div>

            <table class="pf-v5-c-table pf-m-grid-md">
                <thead>
                    <tr>
                        <th>{"Name"}</th>
                        <th>{"Description"}</th>
                        <th>{"Features"}</th>
                        <th>{"Pricing"}</th>
                        <th>{"URL"}</th>
                        <th>{"Extracted"}</th>
                    </tr>
                </thead>
                <tbody>
                    {for props.records.iter().enumerate().map(|(index, record)| html! {
                        <RecordRow
                            key={row_key(record, index)}
                            record={record.clone()}
                        />
                    })}
                </tbody>
            </table>

            <div class="footer">
                {format!("{} total extractions", props.records.len())}
            </div>
        </div>
    }
}

fn row_key(record: &ExtractionRecord, index: usize) -> String {
    match &record.id {
        Some(id) => id.to_string(),
        None => format!("row-{}", index),
    }
}

#[derive(Properties, PartialEq)]
struct RecordRowProps {
    record: ExtractionRecord,
}

#[function_component(RecordRow)]
fn record_row(props: &RecordRowProps) -> Html {
    let record = &props.record;

    let description = match record.description.as_deref() {
        Some(text) if !text.is_empty() => truncate_description(text),
        _ => or_placeholder(None).to_string(),
    };

    let features = match record.features.as_deref().filter(|text| !text.trim().is_empty()) {
        Some(text) => {
            let tags = feature_tags(text);
            html! {
                <div class="feature-tags">
                    {for tags.visible.iter().map(|tag| html! {
                        <span class="feature-tag">{tag}</span>
                    })}
                    if let Some(label) = tags.overflow_label() {
                        <span class="feature-overflow">{label}</span>
                    }
                </div>
            }
        }
        None => html! { {or_placeholder(None)} },
    };

    let extracted = match record.extracted_at.as_deref().and_then(format_timestamp) {
        Some((date, time)) => html! {
            <>
                <div class="extracted-date">{date}</div>
                <div class="extracted-time">{time}</div>
            </>
        },
        None => html! { {or_placeholder(record.extracted_at.as_deref())} },
    };

    html! {
        <tr>
            <td class="record-name">{or_placeholder(record.name.as_deref())}</td>
            <td class="record-description">{description}</td>
            <td>{features}</td>
            <td class="record-pricing">{or_placeholder(record.pricing.as_deref())}</td>
            <td>
                <a href={record.url.clone()} target="_blank" rel="noopener noreferrer" class="record-link">
                    {display_host(&record.url)}
                </a>
            </td>
            <td>{extracted}</td>
        </tr>
    }
}

/// Local date and time for a server timestamp, `None` if it does not parse
pub fn format_timestamp(raw: &str) -> Option<(String, String)> {
    let date = Date::new(&JsValue::from_str(&normalize_timestamp(raw)));
    if date.get_time().is_nan() {
        return None;
    }

    let day = format!(
        "{:04}-{:02}-{:02}",
        date.get_full_year(),
        date.get_month() + 1,
        date.get_date()
    );
    let time = format!("{:02}:{:02}", date.get_hours(), date.get_minutes());
    Some((day, time))
}
