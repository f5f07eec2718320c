use chrono::Utc;
use gloo_net::http::Request;
use log::{info, warn};
use wasm_bindgen_futures::spawn_local;
use web_sys::{FormData, HtmlFormElement};
use yew::prelude::*;

use crate::components::success_modal::SuccessModal;
use crate::config;
use crate::contact::fields::{ContactFields, Field, ValidationReport};
use crate::contact::preview::format_timestamp;
use crate::contact::submission::{
    interpret_reply, is_json_content_type, ContactResponse, SubmitOutcome, SubmitPhase,
    GENERIC_FAILURE,
};

const TEXT_FIELDS: [&str; 7] = [
    "firstName", "lastName", "email", "company", "industry", "budget", "message",
];

const SERVICES: [(&str, &str); 6] = [
    ("ppc", "Paid Search (PPC)"),
    ("social", "Paid Social"),
    ("programmatic", "Programmatic Display"),
    ("influencer", "Influencer Campaigns"),
    ("seo", "SEO & Content"),
    ("creative", "Creative Production"),
];

const INDUSTRIES: [(&str, &str); 5] = [
    ("gaming", "Gaming"),
    ("finance", "Finance"),
    ("crypto", "Crypto & Web3"),
    ("realestate", "Real Estate"),
    ("other", "Other"),
];

const BUDGETS: [&str; 4] = ["Under $5k", "$5k - $20k", "$20k - $50k", "$50k+"];

/// Reads the form the way the browser would serialize it.
fn read_form(form_data: &FormData) -> ContactFields {
    let mut pairs: Vec<(String, String)> = TEXT_FIELDS
        .iter()
        .filter_map(|name| {
            form_data
                .get(name)
                .as_string()
                .map(|value| (name.to_string(), value))
        })
        .collect();
    for value in form_data.get_all("services").iter() {
        if let Some(value) = value.as_string() {
            pairs.push(("services".to_string(), value));
        }
    }
    if form_data.has("privacy") {
        pairs.push(("privacy".to_string(), "on".to_string()));
    }
    ContactFields::from_pairs(pairs)
}

async fn post_form(
    form_data: FormData,
    submitted: &ContactFields,
) -> Result<SubmitOutcome, gloo_net::Error> {
    let response = Request::post(&config::contact_endpoint())
        .header("X-Requested-With", "XMLHttpRequest")
        .body(form_data)
        .send()
        .await?;

    let ok = response.ok();
    let content_type = response.headers().get("content-type");
    let body = if is_json_content_type(content_type.as_deref()) {
        match response.json::<ContactResponse>().await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!("contact reply was not valid JSON: {}", e);
                None
            }
        }
    } else {
        None
    };
    info!("contact relay answered with status {}", response.status());

    let timestamp = format_timestamp(Utc::now());
    Ok(interpret_reply(ok, body.as_ref(), submitted, &timestamp))
}

#[function_component(ContactForm)]
pub fn contact_form() -> Html {
    let form_ref = use_node_ref();
    let report = use_state(|| None::<ValidationReport>);
    let phase = use_state(|| SubmitPhase::Idle);
    let server_error = use_state(|| None::<String>);
    let preview = use_state(|| None::<String>);

    let onsubmit = {
        let form_ref = form_ref.clone();
        let report = report.clone();
        let phase = phase.clone();
        let server_error = server_error.clone();
        let preview = preview.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *phase != SubmitPhase::Idle {
                return;
            }
            let Some(form) = form_ref.cast::<HtmlFormElement>() else {
                return;
            };
            let Ok(form_data) = FormData::new_with_form(&form) else {
                warn!("could not read the contact form");
                return;
            };

            let fields = read_form(&form_data);
            let checked = fields.validate();
            let valid = checked.is_valid();
            report.set(Some(checked));
            server_error.set(None);
            if !valid {
                return;
            }

            phase.set(SubmitPhase::Submitting);
            let report = report.clone();
            let phase = phase.clone();
            let server_error = server_error.clone();
            let preview = preview.clone();
            spawn_local(async move {
                match post_form(form_data, &fields).await {
                    Ok(SubmitOutcome::Sent { preview: text }) => {
                        form.reset();
                        report.set(None);
                        preview.set(Some(text));
                        phase.set(SubmitPhase::Idle);
                    }
                    Ok(SubmitOutcome::Rejected { message }) => {
                        server_error.set(Some(message));
                        phase.set(SubmitPhase::Idle);
                    }
                    Err(e) => {
                        warn!("contact request failed, posting natively: {}", e);
                        phase.set(SubmitPhase::FallingBack);
                        if form.submit().is_err() {
                            server_error.set(Some(GENERIC_FAILURE.to_string()));
                            phase.set(SubmitPhase::Idle);
                        }
                    }
                }
            });
        })
    };

    let close_modal = {
        let preview = preview.clone();
        Callback::from(move |_| preview.set(None))
    };

    let decoration = |field: Field| -> Option<&'static str> {
        (*report).as_ref().map(|r| r.state_of(field).class())
    };
    let feedback = |field: Field| -> Html {
        match (*report).as_ref() {
            Some(r) if r.has_issue(field) => html! {
                <div class="invalid-feedback" style="display: block;">{ field.message() }</div>
            },
            _ => html! {},
        }
    };
    let busy = *phase != SubmitPhase::Idle;
    let services_invalid = (*report).as_ref().map_or(false, |r| r.has_issue(Field::Services));

    let text_input = |field: Field, label: &str, input_type: &str| -> Html {
        html! {
            <div class="form-group">
                <label for={field.name()}>{ label }</label>
                <input
                    id={field.name()}
                    name={field.name()}
                    type={input_type.to_string()}
                    class={classes!("form-control", decoration(field))}
                    required=true
                />
                { feedback(field) }
            </div>
        }
    };

    html! {
        <>
            <style>
            {r#".contact-form .form-group { margin-bottom: 1.25rem; }
            .contact-form .form-control {
                width: 100%;
                padding: 0.75rem;
                border-radius: 8px;
                border: 1px solid rgba(255, 255, 255, 0.15);
                background: rgba(255, 255, 255, 0.04);
                color: #fff;
            }
            .contact-form .is-invalid { border-color: #ff6b6b; }
            .contact-form .is-valid { border-color: #4cd964; }
            .contact-form .invalid-feedback { color: #ff6b6b; font-size: 0.85rem; margin-top: 0.35rem; }
            .contact-form .form-alert { white-space: pre-line; color: #ff6b6b; margin-bottom: 1rem; }
            .services-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(200px, 1fr)); gap: 0.5rem; }
            .submit-spinner {
                display: inline-block;
                width: 1rem;
                height: 1rem;
                border: 2px solid rgba(255, 255, 255, 0.3);
                border-top-color: #fff;
                border-radius: 50%;
                animation: spin 0.8s linear infinite;
            }
            @keyframes spin { to { transform: rotate(360deg); } }"#}
            </style>
            <form
                ref={form_ref}
                id="contactForm"
                class="contact-form"
                action={config::native_form_action()}
                method="post"
                enctype="multipart/form-data"
                novalidate=true
                {onsubmit}
            >
                {
                    if let Some(message) = (*server_error).clone() {
                        html! { <div class="form-alert" role="alert">{ message }</div> }
                    } else {
                        html! {}
                    }
                }
                <div class="form-row">
                    { text_input(Field::FirstName, "First name", "text") }
                    { text_input(Field::LastName, "Last name", "text") }
                </div>
                { text_input(Field::Email, "Email", "email") }
                <div class="form-group">
                    <label for="company">{"Company"}</label>
                    <input id="company" name="company" type="text" class="form-control" />
                </div>
                <div class="form-group">
                    <label for="industry">{"Industry"}</label>
                    <select
                        id="industry"
                        name="industry"
                        class={classes!("form-control", decoration(Field::Industry))}
                        required=true
                    >
                        <option value="" selected=true>{"Select your industry"}</option>
                        { for INDUSTRIES.iter().map(|(value, label)| html! {
                            <option value={*value}>{ *label }</option>
                        }) }
                    </select>
                    { feedback(Field::Industry) }
                </div>
                <div class="form-group">
                    <label for="budget">{"Monthly budget"}</label>
                    <select id="budget" name="budget" class="form-control">
                        <option value="" selected=true>{"Prefer not to say"}</option>
                        { for BUDGETS.iter().map(|budget| html! {
                            <option value={*budget}>{ *budget }</option>
                        }) }
                    </select>
                </div>
                <fieldset class="form-group">
                    <legend>{"Services you are interested in"}</legend>
                    <div class="services-grid">
                        { for SERVICES.iter().map(|(value, label)| html! {
                            <label class="service-option">
                                <input type="checkbox" name="services" value={*value} />
                                { " " }{ *label }
                            </label>
                        }) }
                    </div>
                    <div
                        id="services-feedback"
                        class="invalid-feedback"
                        style={if services_invalid { "display: block;" } else { "display: none;" }}
                    >
                        { Field::Services.message() }
                    </div>
                </fieldset>
                <div class="form-group">
                    <label for="message">{"Project details"}</label>
                    <textarea
                        id="message"
                        name="message"
                        rows="5"
                        class={classes!("form-control", decoration(Field::Message))}
                        required=true
                    />
                    { feedback(Field::Message) }
                </div>
                <div class="form-group">
                    <label class="privacy-option">
                        <input
                            type="checkbox"
                            id="privacy"
                            name="privacy"
                            class={classes!(decoration(Field::Privacy))}
                        />
                        { " I agree to be contacted about my inquiry." }
                    </label>
                    { feedback(Field::Privacy) }
                </div>
                <button type="submit" class="btn-primary" disabled={busy}>
                    if busy {
                        <span class="submit-spinner" role="status" aria-hidden="true"></span>
                    } else {
                        <span class="submit-text">{"Send inquiry"}</span>
                    }
                </button>
            </form>
            <SuccessModal preview={(*preview).clone()} on_close={close_modal} />
        </>
    }
}
