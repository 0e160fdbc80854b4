use dioxus::prelude::*;
use store::ImageFile;

/// File picker for a single image. Reads the picked file and hands it over
/// as an [`ImageFile`].
#[component]
pub fn ImageInput(
    #[props(default, into)] id: String,
    #[props(default)] disabled: bool,
    on_pick: EventHandler<ImageFile>,
) -> Element {
    let mut read_error = use_signal(|| Option::<String>::None);

    let on_change = move |evt: FormEvent| {
        let mut files = evt.files();
        let Some(file) = files.pop() else {
            return;
        };
        let name = file.name();
        let content_type = file.content_type();
        spawn(async move {
            match file.read_bytes().await {
                Ok(bytes) => {
                    read_error.set(None);
                    on_pick.call(ImageFile {
                        name,
                        bytes: bytes.to_vec(),
                        content_type,
                    });
                }
                Err(e) => {
                    tracing::error!("Failed to read {name}: {e}");
                    read_error.set(Some(format!("Could not read {name}.")));
                }
            }
        });
    };

    rsx! {
        input {
            id: "{id}",
            class: "input",
            r#type: "file",
            accept: "image/*",
            disabled,
            onchange: on_change,
        }
        if let Some(err) = read_error() {
            p { class: "field-error", "{err}" }
        }
    }
}
