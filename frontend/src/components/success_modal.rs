use web_sys::KeyboardEvent;
use yew::prelude::*;
use yew_hooks::use_event_with_window;

#[derive(Properties, PartialEq)]
pub struct SuccessModalProps {
    /// The inquiry text as it was mailed. `None` keeps the modal closed.
    pub preview: Option<String>,
    pub on_close: Callback<()>,
}

#[function_component(SuccessModal)]
pub fn success_modal(props: &SuccessModalProps) -> Html {
    let open = props.preview.is_some();

    {
        let on_close = props.on_close.clone();
        use_event_with_window("keydown", move |e: KeyboardEvent| {
            if open && e.key() == "Escape" {
                on_close.emit(());
            }
        });
    }

    let Some(preview) = props.preview.clone() else {
        return html! {};
    };

    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    // Clicks inside the dialog must not reach the backdrop.
    let swallow = Callback::from(|e: MouseEvent| e.stop_propagation());

    html! {
        <div class="modal-backdrop show" onclick={close.clone()}>
            <style>
            {r#".modal-backdrop {
                position: fixed;
                inset: 0;
                background: rgba(0, 0, 0, 0.6);
                display: flex;
                align-items: center;
                justify-content: center;
                z-index: 1000;
            }
            .modal-dialog {
                background: #151515;
                border: 1px solid rgba(126, 178, 255, 0.2);
                border-radius: 12px;
                padding: 2rem;
                max-width: 560px;
                width: calc(100% - 2rem);
                color: #fff;
            }
            .modal-dialog pre {
                white-space: pre-wrap;
                background: rgba(255, 255, 255, 0.05);
                padding: 1rem;
                border-radius: 8px;
                max-height: 50vh;
                overflow-y: auto;
            }"#}
            </style>
            <div
                id="successModal"
                class="modal-dialog"
                role="dialog"
                aria-modal="true"
                aria-labelledby="successModalTitle"
                onclick={swallow}
            >
                <h2 id="successModalTitle">{"Thanks! Your inquiry is on its way."}</h2>
                <p>{"This is what we received:"}</p>
                <pre id="emailPreview">{preview}</pre>
                <button class="btn-primary" onclick={close}>{"Close"}</button>
            </div>
        </div>
    }
}
