//! C-ABI wrapper around `monday-core`.
//!
//! # Overview
//! Exposes the monday.com client API through `extern "C"` functions so any
//! language with a C FFI can build and parse HTTP requests/responses and
//! decode column values without linking to serde directly.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Per-operation `build_*` / `parse_*` mirrors the core API 1:1.
//! - A single `FfiMondayResult` envelope with `FfiDataTag` + `void* data`
//!   conveys success payloads and errors uniformly.
//! - The C caller owns all returned pointers and must call the matching
//!   `monday_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use monday_core::http::HttpResponse;
use monday_core::types::{Column, ColumnMap};
use monday_core::values::{decode_value, ColumnValues};

use types::*;

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `MondayClient`.
///
/// `api_url` may be null to use the production endpoint. Returns null if
/// `token` is null or if an internal panic occurs.
/// The caller must free the returned pointer with `monday_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn monday_client_new(
    api_url: *const c_char,
    token: *const c_char,
) -> *mut FfiMondayClient {
    catch_unwind(|| {
        if token.is_null() {
            return std::ptr::null_mut();
        }
        let token = unsafe { CStr::from_ptr(token) }.to_str().unwrap_or("");
        let inner = if api_url.is_null() {
            monday_core::MondayClient::new(token)
        } else {
            let url = unsafe { CStr::from_ptr(api_url) }.to_str().unwrap_or("");
            monday_core::MondayClient::with_endpoint(url, token)
        };
        Box::into_raw(Box::new(FfiMondayClient { inner }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a `MondayClient` created by `monday_client_new`. Safe to call with
/// null.
#[unsafe(no_mangle)]
pub extern "C" fn monday_client_free(client: *mut FfiMondayClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Build the list-users request. Returns null if `client` is null.
/// The caller must free the returned pointer with `monday_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn monday_build_list_users(client: *const FfiMondayClient) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        match client.inner.build_list_users() {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build the list-boards request. Returns null if `client` is null.
#[unsafe(no_mangle)]
pub extern "C" fn monday_build_list_boards(client: *const FfiMondayClient) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        match client.inner.build_list_boards() {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build the list-groups request for a board. Returns null if `client` is
/// null.
#[unsafe(no_mangle)]
pub extern "C" fn monday_build_list_groups(
    client: *const FfiMondayClient,
    board_id: i64,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        match client.inner.build_list_groups(board_id) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build the list-columns request for a board. Returns null if `client` is
/// null.
#[unsafe(no_mangle)]
pub extern "C" fn monday_build_list_columns(
    client: *const FfiMondayClient,
    board_id: i64,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        match client.inner.build_list_columns(board_id) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build the list-items request for a board. Returns null if `client` is
/// null.
#[unsafe(no_mangle)]
pub extern "C" fn monday_build_list_items(
    client: *const FfiMondayClient,
    board_id: i64,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        match client.inner.build_list_items(board_id) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build the create-item request.
///
/// `column_values_json` is a JSON object mapping column id to the column's
/// wire-format value; it may be null to create the item without values.
/// Returns null if `client`, `group_id`, or `item_name` is null, or if
/// `column_values_json` is not a JSON object.
#[unsafe(no_mangle)]
pub extern "C" fn monday_build_create_item(
    client: *const FfiMondayClient,
    board_id: i64,
    group_id: *const c_char,
    item_name: *const c_char,
    column_values_json: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || group_id.is_null() || item_name.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let group_id = unsafe { CStr::from_ptr(group_id) }.to_str().unwrap_or("");
        let item_name = unsafe { CStr::from_ptr(item_name) }.to_str().unwrap_or("");

        let values = if column_values_json.is_null() {
            ColumnValues::new()
        } else {
            let raw = unsafe { CStr::from_ptr(column_values_json) }
                .to_str()
                .unwrap_or("");
            let parsed: serde_json::Value = match serde_json::from_str(raw) {
                Ok(v) => v,
                Err(_) => return std::ptr::null_mut(),
            };
            match ColumnValues::from_value(parsed) {
                Ok(values) => values,
                Err(_) => return std::ptr::null_mut(),
            }
        };

        match client
            .inner
            .build_create_item(board_id, group_id, item_name, &values)
        {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build the create-update request for an item.
///
/// `item_id` is the string id returned by create-item; it must be numeric.
/// Returns null if `client`, `item_id`, or `body` is null, or if `item_id`
/// is not numeric.
#[unsafe(no_mangle)]
pub extern "C" fn monday_build_create_update(
    client: *const FfiMondayClient,
    item_id: *const c_char,
    body: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || item_id.is_null() || body.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let item_id = unsafe { CStr::from_ptr(item_id) }.to_str().unwrap_or("");
        let body = unsafe { CStr::from_ptr(body) }.to_str().unwrap_or("");
        match client.inner.build_create_update(item_id, body) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

/// Convert an `FfiHttpResponse` to a core `HttpResponse`.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = if resp.body.is_null() {
        String::new()
    } else {
        unsafe { CStr::from_ptr(resp.body) }
            .to_str()
            .unwrap_or("")
            .to_string()
    };
    HttpResponse {
        status: resp.status,
        body,
    }
}

/// Parse an HTTP response from a list-users request.
///
/// Returns a result with `data_tag = UserList` on success.
#[unsafe(no_mangle)]
pub extern "C" fn monday_parse_list_users(
    client: *const FfiMondayClient,
    response: *const FfiHttpResponse,
) -> *mut FfiMondayResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiMondayResult::null_arg("client");
        }
        if response.is_null() {
            return FfiMondayResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = ffi_response_to_core(unsafe { &*response });
        match client.inner.parse_list_users(resp) {
            Ok(users) => FfiMondayResult::ok_users(users),
            Err(e) => FfiMondayResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiMondayResult::panic("panic in monday_parse_list_users"))
}

/// Parse an HTTP response from a list-boards request.
///
/// Returns a result with `data_tag = BoardList` on success.
#[unsafe(no_mangle)]
pub extern "C" fn monday_parse_list_boards(
    client: *const FfiMondayClient,
    response: *const FfiHttpResponse,
) -> *mut FfiMondayResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiMondayResult::null_arg("client");
        }
        if response.is_null() {
            return FfiMondayResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = ffi_response_to_core(unsafe { &*response });
        match client.inner.parse_list_boards(resp) {
            Ok(boards) => FfiMondayResult::ok_boards(boards),
            Err(e) => FfiMondayResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiMondayResult::panic("panic in monday_parse_list_boards"))
}

/// Parse an HTTP response from a list-groups request.
///
/// Returns a result with `data_tag = GroupList` on success.
#[unsafe(no_mangle)]
pub extern "C" fn monday_parse_list_groups(
    client: *const FfiMondayClient,
    response: *const FfiHttpResponse,
) -> *mut FfiMondayResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiMondayResult::null_arg("client");
        }
        if response.is_null() {
            return FfiMondayResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = ffi_response_to_core(unsafe { &*response });
        match client.inner.parse_list_groups(resp) {
            Ok(groups) => FfiMondayResult::ok_groups(groups),
            Err(e) => FfiMondayResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiMondayResult::panic("panic in monday_parse_list_groups"))
}

/// Parse an HTTP response from a list-columns request.
///
/// Returns a result with `data_tag = ColumnList` on success. The column list
/// doubles as the lookup table for `monday_decode_value`.
#[unsafe(no_mangle)]
pub extern "C" fn monday_parse_list_columns(
    client: *const FfiMondayClient,
    response: *const FfiHttpResponse,
) -> *mut FfiMondayResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiMondayResult::null_arg("client");
        }
        if response.is_null() {
            return FfiMondayResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = ffi_response_to_core(unsafe { &*response });
        match client.inner.parse_list_columns(resp) {
            Ok(columns) => FfiMondayResult::ok_columns(columns),
            Err(e) => FfiMondayResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiMondayResult::panic("panic in monday_parse_list_columns"))
}

/// Parse an HTTP response from a list-items request.
///
/// Returns a result with `data_tag = ItemList` on success.
#[unsafe(no_mangle)]
pub extern "C" fn monday_parse_list_items(
    client: *const FfiMondayClient,
    response: *const FfiHttpResponse,
) -> *mut FfiMondayResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiMondayResult::null_arg("client");
        }
        if response.is_null() {
            return FfiMondayResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = ffi_response_to_core(unsafe { &*response });
        match client.inner.parse_list_items(resp) {
            Ok(items) => FfiMondayResult::ok_items(items),
            Err(e) => FfiMondayResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiMondayResult::panic("panic in monday_parse_list_items"))
}

/// Parse an HTTP response from a create-item request.
///
/// Returns a result with `data_tag = Id` on success.
#[unsafe(no_mangle)]
pub extern "C" fn monday_parse_create_item(
    client: *const FfiMondayClient,
    response: *const FfiHttpResponse,
) -> *mut FfiMondayResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiMondayResult::null_arg("client");
        }
        if response.is_null() {
            return FfiMondayResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = ffi_response_to_core(unsafe { &*response });
        match client.inner.parse_create_item(resp) {
            Ok(id) => FfiMondayResult::ok_id(id),
            Err(e) => FfiMondayResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiMondayResult::panic("panic in monday_parse_create_item"))
}

/// Parse an HTTP response from a create-update request.
///
/// Returns a result with `data_tag = Id` on success.
#[unsafe(no_mangle)]
pub extern "C" fn monday_parse_create_update(
    client: *const FfiMondayClient,
    response: *const FfiHttpResponse,
) -> *mut FfiMondayResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiMondayResult::null_arg("client");
        }
        if response.is_null() {
            return FfiMondayResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = ffi_response_to_core(unsafe { &*response });
        match client.inner.parse_create_update(resp) {
            Ok(id) => FfiMondayResult::ok_id(id),
            Err(e) => FfiMondayResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiMondayResult::panic("panic in monday_parse_create_update"))
}

// ---------------------------------------------------------------------------
// Value decoding
// ---------------------------------------------------------------------------

/// Decode one column value against a column list previously obtained from
/// `monday_parse_list_columns`.
///
/// `value_json` is the raw value JSON of the column (may be null for an
/// unset column). Returns a result with `data_tag = DecodedValue` on
/// success.
#[unsafe(no_mangle)]
pub extern "C" fn monday_decode_value(
    columns: *const FfiColumnList,
    column_id: *const c_char,
    value_json: *const c_char,
) -> *mut FfiMondayResult {
    catch_unwind(|| {
        if columns.is_null() {
            return FfiMondayResult::null_arg("columns");
        }
        if column_id.is_null() {
            return FfiMondayResult::null_arg("column_id");
        }
        let list = unsafe { &*columns };
        let core_columns: Vec<Column> = if list.items.is_null() || list.len == 0 {
            Vec::new()
        } else {
            unsafe { std::slice::from_raw_parts(list.items, list.len as usize) }
                .iter()
                .map(|c| Column {
                    id: read_c_string(c.id),
                    title: read_c_string(c.title),
                    column_type: read_c_string(c.column_type),
                    settings: read_c_string(c.settings),
                })
                .collect()
        };
        let map = ColumnMap::from_columns(core_columns);

        let column_id = unsafe { CStr::from_ptr(column_id) }.to_str().unwrap_or("");
        let value = if value_json.is_null() {
            None
        } else {
            Some(
                unsafe { CStr::from_ptr(value_json) }
                    .to_str()
                    .unwrap_or("")
                    .to_string(),
            )
        };
        let value = column_value_from_ffi(column_id, value);

        match decode_value(&map, &value) {
            Ok(decoded) => FfiMondayResult::ok_decoded(decoded),
            Err(e) => FfiMondayResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiMondayResult::panic("panic in monday_decode_value"))
}

fn read_c_string(ptr: *mut c_char) -> String {
    if ptr.is_null() {
        String::new()
    } else {
        unsafe { CStr::from_ptr(ptr) }.to_str().unwrap_or("").to_string()
    }
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

fn free_c_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(unsafe { CString::from_raw(ptr) });
    }
}

unsafe fn take_vec<T>(ptr: *mut T, len: u32) -> Vec<T> {
    unsafe { Vec::from_raw_parts(ptr, len as usize, len as usize) }
}

/// Free an `FfiHttpRequest` returned by any `monday_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn monday_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.url);
        free_c_string(req.body);
        if !req.headers.is_null() && req.headers_len > 0 {
            for header in unsafe { take_vec(req.headers, req.headers_len) } {
                free_c_string(header.key);
                free_c_string(header.value);
            }
        }
    });
}

/// Free an `FfiMondayResult` returned by any `monday_parse_*` function or by
/// `monday_decode_value`. Safe to call with null. Uses `data_tag` to
/// determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn monday_free_result(result: *mut FfiMondayResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.error_message);
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::None => {}
            FfiDataTag::UserList => {
                let list = unsafe { Box::from_raw(result.data as *mut FfiUserList) };
                if !list.items.is_null() && list.len > 0 {
                    for user in unsafe { take_vec(list.items, list.len) } {
                        free_c_string(user.name);
                        free_c_string(user.email);
                    }
                }
            }
            FfiDataTag::BoardList => {
                let list = unsafe { Box::from_raw(result.data as *mut FfiBoardList) };
                if !list.items.is_null() && list.len > 0 {
                    for board in unsafe { take_vec(list.items, list.len) } {
                        free_c_string(board.id);
                        free_c_string(board.name);
                    }
                }
            }
            FfiDataTag::GroupList => {
                let list = unsafe { Box::from_raw(result.data as *mut FfiGroupList) };
                if !list.items.is_null() && list.len > 0 {
                    for group in unsafe { take_vec(list.items, list.len) } {
                        free_c_string(group.id);
                        free_c_string(group.title);
                    }
                }
            }
            FfiDataTag::ColumnList => {
                let list = unsafe { Box::from_raw(result.data as *mut FfiColumnList) };
                if !list.items.is_null() && list.len > 0 {
                    for column in unsafe { take_vec(list.items, list.len) } {
                        free_c_string(column.id);
                        free_c_string(column.title);
                        free_c_string(column.column_type);
                        free_c_string(column.settings);
                    }
                }
            }
            FfiDataTag::ItemList => {
                let list = unsafe { Box::from_raw(result.data as *mut FfiItemList) };
                if !list.items.is_null() && list.len > 0 {
                    for item in unsafe { take_vec(list.items, list.len) } {
                        free_c_string(item.id);
                        free_c_string(item.group_id);
                        free_c_string(item.name);
                        if !item.column_values.is_null() && item.column_values_len > 0 {
                            for value in
                                unsafe { take_vec(item.column_values, item.column_values_len) }
                            {
                                free_c_string(value.id);
                                free_c_string(value.value);
                            }
                        }
                    }
                }
            }
            FfiDataTag::Id => {
                let id = unsafe { Box::from_raw(result.data as *mut FfiId) };
                free_c_string(id.id);
            }
            FfiDataTag::DecodedValue => {
                let decoded = unsafe { Box::from_raw(result.data as *mut FfiDecodedValue) };
                free_c_string(decoded.single);
                if !decoded.values.is_null() && decoded.values_len > 0 {
                    for value in unsafe { take_vec(decoded.values, decoded.values_len) } {
                        free_c_string(value);
                    }
                }
            }
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn monday_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
