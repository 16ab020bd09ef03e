//! Bindings generated at build time from the codegen fixtures.
//!
//! Each unit lands in its own module, the way a build script of a consumer
//! crate would include them. The tests drive the generated wrappers through
//! in-process method tables standing in for the native side.

pub mod node {
    include!(concat!(env!("OUT_DIR"), "/node.rs"));
}

pub mod element {
    include!(concat!(env!("OUT_DIR"), "/element.rs"));
}

pub mod dom_point {
    include!(concat!(env!("OUT_DIR"), "/domPoint.rs"));
}

pub mod event_init {
    include!(concat!(env!("OUT_DIR"), "/event_init.rs"));
}

pub mod mouse_event_init {
    include!(concat!(env!("OUT_DIR"), "/mouse_event_init.rs"));
}

pub use dom_point::*;
pub use element::*;
pub use event_init::*;
pub use mouse_event_init::*;
pub use node::*;

#[cfg(test)]
mod tests {
    use super::*;
    use ironidl_core::{
        BoundaryError, BoundaryHandle, ExceptionState, ExceptionStateRustMethods, OpaquePtr,
        RustValue, RustValueStatus, ironidl_string_new,
    };
    use std::cell::{Cell, RefCell};
    use std::ffi::{CStr, c_char};

    thread_local! {
        static RELEASED: Cell<usize> = const { Cell::new(0) };
    }

    /// Native object behind the fake tables.
    struct FakeObject {
        name: &'static str,
        id: RefCell<String>,
        pointer_id: Cell<i64>,
    }

    impl FakeObject {
        fn new(name: &'static str) -> Self {
            Self {
                name,
                id: RefCell::new(String::new()),
                pointer_id: Cell::new(0),
            }
        }

        fn as_ptr(&self) -> *const OpaquePtr {
            (self as *const Self).cast()
        }
    }

    fn object<'a>(ptr: *const OpaquePtr) -> &'a FakeObject {
        unsafe { &*ptr.cast::<FakeObject>() }
    }

    fn native_string(text: &str) -> *const c_char {
        unsafe { ironidl_string_new(text.as_ptr().cast(), text.len()) }
    }

    fn borrowed(text: *const c_char) -> String {
        unsafe { CStr::from_ptr(text) }.to_string_lossy().into_owned()
    }

    extern "C" fn release(_: *const OpaquePtr) {
        RELEASED.with(|count| count.set(count.get() + 1));
    }

    extern "C" fn node_name(ptr: *const OpaquePtr) -> *const c_char {
        native_string(object(ptr).name)
    }

    extern "C" fn is_connected(_: *const OpaquePtr) -> i32 {
        1
    }

    extern "C" fn append_child(
        _: *const OpaquePtr,
        node: RustValue<NodeRustMethods>,
        _: *const OpaquePtr,
    ) -> RustValue<NodeRustMethods> {
        node
    }

    extern "C" fn append_nothing(
        _: *const OpaquePtr,
        _: RustValue<NodeRustMethods>,
        _: *const OpaquePtr,
    ) -> RustValue<NodeRustMethods> {
        RustValue::new(std::ptr::null(), std::ptr::null(), std::ptr::null())
    }

    extern "C" fn id(ptr: *const OpaquePtr) -> *const c_char {
        native_string(&object(ptr).id.borrow())
    }

    extern "C" fn set_id(ptr: *const OpaquePtr, value: *const c_char, _: *const OpaquePtr) {
        *object(ptr).id.borrow_mut() = borrowed(value);
    }

    extern "C" fn get_attribute(
        ptr: *const OpaquePtr,
        name: *const c_char,
        _: *const OpaquePtr,
    ) -> *const c_char {
        native_string(&format!("{}[{}]", object(ptr).name, borrowed(name)))
    }

    extern "C" fn set_pointer_capture(
        ptr: *const OpaquePtr,
        pointer_id: i64,
        _: *const OpaquePtr,
    ) {
        object(ptr).pointer_id.set(pointer_id);
    }

    extern "C" fn no_exception(_: *const OpaquePtr) -> bool {
        false
    }

    extern "C" fn pending_exception(_: *const OpaquePtr) -> bool {
        true
    }

    extern "C" fn stringify(
        _: *const OpaquePtr,
        _: *const OpaquePtr,
        message: *mut *mut c_char,
        length: *mut u32,
    ) {
        let text = "NotFoundError: no active pointer";
        unsafe {
            *message = ironidl_string_new(text.as_ptr().cast(), text.len());
            *length = text.len() as u32;
        }
    }

    fn node_methods() -> NodeRustMethods {
        NodeRustMethods {
            version: 1.0,
            release,
            node_name,
            is_connected,
            append_child,
        }
    }

    fn element_methods(node: &NodeRustMethods) -> ElementRustMethods {
        ElementRustMethods {
            version: 1.0,
            node,
            id,
            set_id,
            get_attribute,
            set_pointer_capture,
        }
    }

    fn exception_methods(raised: bool) -> ExceptionStateRustMethods {
        ExceptionStateRustMethods {
            version: 1.0,
            has_exception: if raised { pending_exception } else { no_exception },
            stringify,
        }
    }

    #[test]
    fn test_root_class_calls_through_table() {
        let methods = node_methods();
        let exceptions = exception_methods(false);
        let state = ExceptionState::new(std::ptr::null(), &exceptions);
        let status = RustValueStatus::default();
        let native = FakeObject::new("DIV");
        RELEASED.with(|count| count.set(0));

        {
            let handle = BoundaryHandle::new(native.as_ptr(), std::ptr::null(), &methods, &status);
            let node = unsafe { Node::initialize(handle) }.expect("node");
            assert_eq!(node.node_name(), Ok("DIV".to_string()));
            assert_eq!(node.is_connected(), Ok(true));

            let child = node.append_child(&node, &state).expect("append");
            assert_eq!(child.boundary().ptr(), native.as_ptr());
            assert_eq!(Node::CLASS_NAME, "Node");
        }
        assert_eq!(RELEASED.with(Cell::get), 2);
    }

    #[test]
    fn test_derived_class_chains_and_releases_once() {
        let node = node_methods();
        let methods = element_methods(&node);
        let exceptions = exception_methods(false);
        let state = ExceptionState::new(std::ptr::null(), &exceptions);
        let status = RustValueStatus::default();
        let native = FakeObject::new("SPAN");
        RELEASED.with(|count| count.set(0));

        {
            let handle = BoundaryHandle::new(native.as_ptr(), std::ptr::null(), &methods, &status);
            let element = unsafe { Element::initialize(handle) }.expect("element");

            element.set_id("main", &state).expect("set id");
            assert_eq!(element.id(), Ok("main".to_string()));
            assert_eq!(
                element.get_attribute("class", &state),
                Ok("SPAN[class]".to_string())
            );
            element.set_pointer_capture(7, &state).expect("capture");
            assert_eq!(native.pointer_id.get(), 7);

            // Inherited through Deref.
            assert_eq!(element.node_name(), Ok("SPAN".to_string()));
        }
        assert_eq!(RELEASED.with(Cell::get), 1);
    }

    #[test]
    fn test_native_exception_surfaces_as_error() {
        let node = node_methods();
        let methods = element_methods(&node);
        let exceptions = exception_methods(true);
        let state = ExceptionState::new(std::ptr::null(), &exceptions);
        let status = RustValueStatus::default();
        let native = FakeObject::new("SPAN");

        let handle = BoundaryHandle::new(native.as_ptr(), std::ptr::null(), &methods, &status);
        let element = unsafe { Element::initialize(handle) }.expect("element");
        assert_eq!(
            element.set_pointer_capture(1, &state),
            Err(BoundaryError::exception("NotFoundError: no active pointer"))
        );
    }

    #[test]
    fn test_null_and_disposed_objects_rejected_for_every_class() {
        let mut node = node_methods();
        let methods = element_methods(&node);
        let status = RustValueStatus::default();
        let disposed = RustValueStatus { disposed: 1 };
        let native = FakeObject::new("P");

        let null_node = BoundaryHandle::new(std::ptr::null(), std::ptr::null(), &node, &status);
        assert!(matches!(
            unsafe { Node::initialize(null_node) },
            Err(BoundaryError::NullPointer { what: "object" })
        ));
        let null_element =
            BoundaryHandle::new(std::ptr::null(), std::ptr::null(), &methods, &status);
        assert!(matches!(
            unsafe { Element::initialize(null_element) },
            Err(BoundaryError::NullPointer { what: "object" })
        ));

        let dead_node = BoundaryHandle::new(native.as_ptr(), std::ptr::null(), &node, &disposed);
        assert!(matches!(
            unsafe { Node::initialize(dead_node) },
            Err(BoundaryError::Disposed)
        ));

        node.append_child = append_nothing;
        let exceptions = exception_methods(false);
        let state = ExceptionState::new(std::ptr::null(), &exceptions);
        let handle = BoundaryHandle::new(native.as_ptr(), std::ptr::null(), &node, &status);
        let parent = unsafe { Node::initialize(handle) }.expect("node");
        assert!(matches!(
            parent.append_child(&parent, &state),
            Err(BoundaryError::NullPointer { what: "object" })
        ));
    }

    #[test]
    fn test_inherited_dictionary_crosses_boundary() {
        let init = MouseEventInit {
            bubbles: true,
            cancelable: 3,
            composed: false,
            client_x: 1.5,
            client_y: -2.0,
            region: "hit-area".to_string(),
        };
        let native = init.to_native().expect("to native");
        let back = unsafe { MouseEventInit::from_raw(native.as_raw()) }.expect("from raw");
        assert_eq!(back, init);

        let null = unsafe { EventInit::from_raw(std::ptr::null()) };
        assert_eq!(null, Err(BoundaryError::null("EventInit")));
    }
}
