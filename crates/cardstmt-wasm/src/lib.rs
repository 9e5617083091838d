//! WASM bindings for the credit card statement parser client.
//!
//! The page wires its file input, drop zone, and parse button to a
//! [`StatementParser`] and re-renders from the view object each call returns.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Promise, Uint8Array};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, future_to_promise};
use web_sys::{DragEvent, Event, File, FileList};

use cardstmt_core::models::config::ServiceConfig;
use cardstmt_core::{
    DropEvent, FilePayload, GestureEvent, HttpParseService, ParseService, View, WorkflowController,
};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// A browser `File`; name and declared type are captured up front.
#[derive(Debug, Clone)]
pub struct BrowserFile {
    file: File,
    name: String,
    media_type: String,
}

impl BrowserFile {
    pub fn new(file: File) -> Self {
        Self {
            name: file.name(),
            media_type: file.type_(),
            file,
        }
    }
}

impl FilePayload for BrowserFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn media_type(&self) -> &str {
        &self.media_type
    }

    async fn read(&self) -> std::io::Result<Vec<u8>> {
        let buffer = JsFuture::from(self.file.array_buffer())
            .await
            .map_err(|e| std::io::Error::other(describe(&e)))?;
        Ok(Uint8Array::new(&buffer).to_vec())
    }
}

fn files_of(list: Option<FileList>) -> Vec<BrowserFile> {
    list.map(|list| {
        (0..list.length())
            .filter_map(|i| list.get(i))
            .map(BrowserFile::new)
            .collect()
    })
    .unwrap_or_default()
}

fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| value.dyn_ref::<js_sys::Error>().map(|e| String::from(e.message())))
        .unwrap_or_else(|| format!("{:?}", value))
}

/// Any DOM event as a suppressible gesture.
struct Gesture<'a>(&'a Event);

impl GestureEvent for Gesture<'_> {
    fn prevent_default(&self) {
        self.0.prevent_default();
    }

    fn stop_propagation(&self) {
        self.0.stop_propagation();
    }
}

/// A DOM `drop` event and its `dataTransfer` files.
struct BrowserDrop<'a>(&'a DragEvent);

impl GestureEvent for BrowserDrop<'_> {
    fn prevent_default(&self) {
        self.0.prevent_default();
    }

    fn stop_propagation(&self) {
        self.0.stop_propagation();
    }
}

impl DropEvent for BrowserDrop<'_> {
    type File = BrowserFile;

    fn files(&self) -> Vec<BrowserFile> {
        files_of(self.0.data_transfer().and_then(|dt| dt.files()))
    }
}

/// Upload-and-extract workflow bound to the page.
#[wasm_bindgen]
pub struct StatementParser {
    controller: Rc<RefCell<WorkflowController<BrowserFile>>>,
    service: Rc<HttpParseService>,
}

#[wasm_bindgen]
impl StatementParser {
    /// Create a parser posting to `endpoint` (default `http://localhost:5000/parse`).
    #[wasm_bindgen(constructor)]
    pub fn new(endpoint: Option<String>) -> Result<StatementParser, JsValue> {
        let mut config = ServiceConfig::default();
        if let Some(endpoint) = endpoint {
            config.endpoint = endpoint;
        }

        let service =
            HttpParseService::new(&config).map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(Self {
            controller: Rc::new(RefCell::new(WorkflowController::new())),
            service: Rc::new(service),
        })
    }

    /// Handle the file input's `change` event. Returns the new view.
    #[wasm_bindgen(js_name = selectFromPicker)]
    pub fn select_from_picker(&self, files: Option<FileList>) -> Result<JsValue, JsValue> {
        // Rejections are part of the view; nothing to throw.
        let _ = self.controller.borrow_mut().select_from_picker(files_of(files));
        self.view()
    }

    /// Handle the drop zone's `drop` event. Returns the new view.
    #[wasm_bindgen(js_name = selectFromDrop)]
    pub fn select_from_drop(&self, event: &DragEvent) -> Result<JsValue, JsValue> {
        let _ = self.controller.borrow_mut().select_from_drop(&BrowserDrop(event));
        self.view()
    }

    /// Handle the drop zone's `dragover` event.
    #[wasm_bindgen(js_name = acceptDragOver)]
    pub fn accept_drag_over(&self, event: &Event) {
        self.controller.borrow().accept_drag_over(&Gesture(event));
    }

    /// Trigger a parse. Resolves with the view once the response is handled.
    ///
    /// While a parse is in flight this resolves immediately with the
    /// current view and sends nothing.
    pub fn parse(&self) -> Promise {
        let request = self.controller.borrow_mut().begin_parse();
        let controller = Rc::clone(&self.controller);
        let service = Rc::clone(&self.service);

        future_to_promise(async move {
            if let Some(request) = request {
                let outcome = service.parse(request.file().payload()).await;
                if let Err(error) = &outcome {
                    web_sys::console::error_1(&JsValue::from_str(&error.to_string()));
                }
                controller.borrow_mut().complete(request.ticket(), outcome);
            }

            let view = View::from(&*controller.borrow());
            to_js(&view)
        })
    }

    /// Current view.
    pub fn view(&self) -> Result<JsValue, JsValue> {
        to_js(&View::from(&*self.controller.borrow()))
    }

    /// Whether the parse button should be enabled.
    #[wasm_bindgen(js_name = canParse)]
    pub fn can_parse(&self) -> bool {
        self.controller.borrow().can_parse()
    }
}

fn to_js(view: &View) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(view).map_err(|e| JsValue::from_str(&e.to_string()))
}
