use yew::prelude::*;

use crate::components::contact_form::ContactForm;

#[function_component(Contact)]
pub fn contact() -> Html {
    html! {
        <div class="contact-page" style="max-width: 720px; margin: 0 auto; padding: 6rem 1rem 4rem;">
            <h1>{"Tell us about your campaign"}</h1>
            <p>{"Share a few details and our team will get back to you within one business day."}</p>
            <ContactForm />
        </div>
    }
}
