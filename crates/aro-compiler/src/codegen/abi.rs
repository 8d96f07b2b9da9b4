//! Runtime ABI: descriptor layouts and external declarations.
//!
//! Generated code talks to the ARO runtime only through the functions
//! declared here. All values cross the boundary as opaque pointers owned by
//! the runtime.

use std::fmt::{self, Write};

use super::verbs::{CANONICAL_VERBS, action_function};

pub const RESULT_DESCRIPTOR: &str = "%AROResultDescriptor";
pub const OBJECT_DESCRIPTOR: &str = "%AROObjectDescriptor";

// Runtime lifecycle
pub const RUNTIME_INIT: &str = "aro_runtime_init";
pub const RUNTIME_SHUTDOWN: &str = "aro_runtime_shutdown";
pub const CONTEXT_CREATE_NAMED: &str = "aro_context_create_named";
pub const CONTEXT_DESTROY: &str = "aro_context_destroy";
pub const LOAD_PLUGINS: &str = "aro_load_precompiled_plugins";
pub const SET_OPENAPI: &str = "aro_set_embedded_openapi";
pub const REGISTER_EVENT_HANDLER: &str = "aro_register_event_handler";

// Variables and values
pub const BIND_STRING: &str = "aro_variable_bind_string";
pub const BIND_INT: &str = "aro_variable_bind_int";
pub const BIND_DOUBLE: &str = "aro_variable_bind_double";
pub const BIND_BOOL: &str = "aro_variable_bind_bool";
pub const BIND_DICT: &str = "aro_variable_bind_dict";
pub const BIND_ARRAY: &str = "aro_variable_bind_array";
pub const BIND_VALUE: &str = "aro_variable_bind_value";
pub const RESOLVE: &str = "aro_variable_resolve";
pub const VALUE_FREE: &str = "aro_value_free";
pub const VALUE_AS_STRING: &str = "aro_value_as_string";
pub const VALUE_AS_INT: &str = "aro_value_as_int";
pub const EVALUATE: &str = "aro_evaluate_expression";

// Actions
pub const CUSTOM_ACTION: &str = "aro_action_custom";

pub const STRCMP: &str = "strcmp";

/// Writes the descriptor type definitions.
pub fn write_descriptor_types(out: &mut impl Write) -> fmt::Result {
    writeln!(out, "; Result descriptor: {{ name, specifiers, specifier_count }}")?;
    writeln!(out, "{RESULT_DESCRIPTOR} = type {{ ptr, ptr, i32 }}")?;
    writeln!(
        out,
        "; Object descriptor: {{ name, preposition, specifiers, specifier_count }}"
    )?;
    writeln!(out, "{OBJECT_DESCRIPTOR} = type {{ ptr, i32, ptr, i32 }}")
}

/// Writes the fixed block of external declarations.
pub fn write_declarations(out: &mut impl Write) -> fmt::Result {
    writeln!(out, "; Runtime lifecycle")?;
    writeln!(out, "declare ptr @{RUNTIME_INIT}()")?;
    writeln!(out, "declare void @{RUNTIME_SHUTDOWN}(ptr)")?;
    writeln!(out, "declare ptr @aro_context_create(ptr)")?;
    writeln!(out, "declare ptr @{CONTEXT_CREATE_NAMED}(ptr, ptr)")?;
    writeln!(out, "declare void @{CONTEXT_DESTROY}(ptr)")?;
    writeln!(out)?;

    writeln!(out, "; Variables and values")?;
    writeln!(out, "declare void @{BIND_STRING}(ptr, ptr, ptr)")?;
    writeln!(out, "declare void @{BIND_INT}(ptr, ptr, i64)")?;
    writeln!(out, "declare void @{BIND_DOUBLE}(ptr, ptr, double)")?;
    writeln!(out, "declare void @{BIND_BOOL}(ptr, ptr, i32)")?;
    writeln!(out, "declare void @{BIND_DICT}(ptr, ptr, ptr)")?;
    writeln!(out, "declare void @{BIND_ARRAY}(ptr, ptr, ptr)")?;
    writeln!(out, "declare void @{BIND_VALUE}(ptr, ptr, ptr)")?;
    writeln!(out, "declare ptr @{RESOLVE}(ptr, ptr)")?;
    writeln!(out, "declare void @{VALUE_FREE}(ptr)")?;
    writeln!(out, "declare ptr @{VALUE_AS_STRING}(ptr)")?;
    writeln!(out, "declare i32 @{VALUE_AS_INT}(ptr, ptr)")?;
    writeln!(out, "declare ptr @{EVALUATE}(ptr, ptr)")?;
    writeln!(out)?;

    writeln!(out, "; Actions: (context, result descriptor, object descriptor)")?;
    for verb in CANONICAL_VERBS {
        writeln!(out, "declare ptr @{}(ptr, ptr, ptr)", action_function(verb))?;
    }
    writeln!(out, "declare ptr @{CUSTOM_ACTION}(ptr, ptr, ptr, ptr)")?;
    writeln!(out)?;

    writeln!(out, "; HTTP server")?;
    writeln!(out, "declare ptr @aro_http_server_create(ptr)")?;
    writeln!(out, "declare i32 @aro_http_server_start(ptr, ptr, i32)")?;
    writeln!(out, "declare void @aro_http_server_stop(ptr)")?;
    writeln!(out, "declare void @aro_http_server_destroy(ptr)")?;
    writeln!(out)?;

    writeln!(out, "; Files")?;
    writeln!(out, "declare ptr @aro_file_read(ptr, ptr)")?;
    writeln!(out, "declare i32 @aro_file_write(ptr, ptr, ptr)")?;
    writeln!(out, "declare i32 @aro_file_exists(ptr, ptr)")?;
    writeln!(out, "declare i32 @aro_file_delete(ptr, ptr)")?;
    writeln!(out)?;

    writeln!(out, "; Events and plugins")?;
    writeln!(out, "declare void @{REGISTER_EVENT_HANDLER}(ptr, ptr, ptr)")?;
    writeln!(out, "declare void @{LOAD_PLUGINS}(ptr)")?;
    writeln!(out, "declare void @{SET_OPENAPI}(ptr)")?;
    writeln!(out)?;

    writeln!(out, "; C library")?;
    writeln!(out, "declare i32 @{STRCMP}(ptr, ptr)")
}
