//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! tagged enums with explicit discriminants. Conversion functions live here
//! to keep `lib.rs` focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use monday_core::error::ApiError;
use monday_core::types::{Board, Column, ColumnValue, Group, Item, User};
use monday_core::values::DecodedValue;

/// Opaque handle to a `MondayClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiMondayClient {
    pub(crate) inner: monday_core::MondayClient,
}

pub(crate) fn c_string(s: String) -> *mut c_char {
    CString::new(s).unwrap_or_default().into_raw()
}

/// Move a vector to the heap and hand ownership to C as pointer + length.
pub(crate) fn into_raw_parts<T>(mut items: Vec<T>) -> (*mut T, u32) {
    if items.is_empty() {
        return (std::ptr::null_mut(), 0);
    }
    items.shrink_to_fit();
    let len = items.len() as u32;
    let ptr = items.as_mut_ptr();
    std::mem::forget(items);
    (ptr, len)
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `monday_build_*` functions. Every request is a POST of `body` to
/// `url` with the listed headers. The C caller executes the request and
/// passes the response back through `monday_parse_*`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: monday_core::HttpRequest) -> *mut Self {
        let headers: Vec<FfiHeader> = req
            .headers
            .into_iter()
            .map(|(k, v)| FfiHeader {
                key: c_string(k),
                value: c_string(v),
            })
            .collect();
        let (headers, headers_len) = into_raw_parts(headers);

        let ffi_req = Box::new(FfiHttpRequest {
            url: c_string(req.url),
            headers,
            headers_len,
            body: c_string(req.body),
        });
        Box::into_raw(ffi_req)
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing an HTTP request,
/// then passes a pointer to a `monday_parse_*` function. The FFI layer reads
/// but does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// An account user exposed to C.
#[repr(C)]
pub struct FfiUser {
    pub id: i64,
    pub name: *mut c_char,
    pub email: *mut c_char,
}

#[repr(C)]
pub struct FfiUserList {
    pub items: *mut FfiUser,
    pub len: u32,
}

/// A board exposed to C.
#[repr(C)]
pub struct FfiBoard {
    pub id: *mut c_char,
    pub name: *mut c_char,
}

#[repr(C)]
pub struct FfiBoardList {
    pub items: *mut FfiBoard,
    pub len: u32,
}

/// A group exposed to C.
#[repr(C)]
pub struct FfiGroup {
    pub id: *mut c_char,
    pub title: *mut c_char,
}

#[repr(C)]
pub struct FfiGroupList {
    pub items: *mut FfiGroup,
    pub len: u32,
}

/// Column metadata exposed to C. `column_type` is the vendor type tag,
/// `settings` the raw settings JSON.
#[repr(C)]
pub struct FfiColumn {
    pub id: *mut c_char,
    pub title: *mut c_char,
    pub column_type: *mut c_char,
    pub settings: *mut c_char,
}

#[repr(C)]
pub struct FfiColumnList {
    pub items: *mut FfiColumn,
    pub len: u32,
}

/// One column's raw value on an item. `value` is null when the column is
/// unset.
#[repr(C)]
pub struct FfiColumnValue {
    pub id: *mut c_char,
    pub value: *mut c_char,
}

/// An item exposed to C.
#[repr(C)]
pub struct FfiItem {
    pub id: *mut c_char,
    pub group_id: *mut c_char,
    pub name: *mut c_char,
    pub column_values: *mut FfiColumnValue,
    pub column_values_len: u32,
}

#[repr(C)]
pub struct FfiItemList {
    pub items: *mut FfiItem,
    pub len: u32,
}

/// Id returned by the create-item and create-update mutations.
#[repr(C)]
pub struct FfiId {
    pub id: *mut c_char,
}

/// Discriminant of an `FfiDecodedValue`.
#[repr(C)]
pub enum FfiDecodedTag {
    /// The column is unset.
    Empty = 0,
    /// Single-valued column types; `single` is set.
    Single = 1,
    /// Multi-valued column types; `values`/`values_len` are set.
    Multiple = 2,
}

/// Result of decoding one column value.
#[repr(C)]
pub struct FfiDecodedValue {
    pub tag: FfiDecodedTag,
    pub single: *mut c_char,
    pub values: *mut *mut c_char,
    pub values_len: u32,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiMondayResult`.
#[repr(C)]
pub enum FfiErrorCode {
    Ok = 0,
    Http = 1,
    Graphql = 2,
    MissingData = 3,
    BoardNotFound = 4,
    Serialization = 5,
    Deserialization = 6,
    UnknownColumnId = 7,
    UnsupportedColumnType = 8,
    InvalidItemId = 9,
    Config = 10,
    Panic = 11,
    NullArg = 12,
}

/// Tag that tells `monday_free_result` what `FfiMondayResult::data` points to.
#[repr(C)]
pub enum FfiDataTag {
    None = 0,
    UserList = 1,
    BoardList = 2,
    GroupList = 3,
    ColumnList = 4,
    ItemList = 5,
    Id = 6,
    DecodedValue = 7,
}

/// Result envelope for all parse and decode operations.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the payload (tagged by `data_tag`).
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, and `data` is null.
#[repr(C)]
pub struct FfiMondayResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut std::ffi::c_void,
}

impl FfiMondayResult {
    fn ok(data_tag: FfiDataTag, data: *mut std::ffi::c_void) -> *mut Self {
        Box::into_raw(Box::new(FfiMondayResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            data_tag,
            data,
        }))
    }

    /// Build a success result carrying an `FfiUserList`.
    pub(crate) fn ok_users(users: Vec<User>) -> *mut Self {
        let users: Vec<FfiUser> = users
            .into_iter()
            .map(|u| FfiUser {
                id: u.id,
                name: c_string(u.name),
                email: c_string(u.email),
            })
            .collect();
        let (items, len) = into_raw_parts(users);
        let list = Box::new(FfiUserList { items, len });
        Self::ok(FfiDataTag::UserList, Box::into_raw(list).cast())
    }

    /// Build a success result carrying an `FfiBoardList`.
    pub(crate) fn ok_boards(boards: Vec<Board>) -> *mut Self {
        let boards: Vec<FfiBoard> = boards
            .into_iter()
            .map(|b| FfiBoard {
                id: c_string(b.id),
                name: c_string(b.name),
            })
            .collect();
        let (items, len) = into_raw_parts(boards);
        let list = Box::new(FfiBoardList { items, len });
        Self::ok(FfiDataTag::BoardList, Box::into_raw(list).cast())
    }

    /// Build a success result carrying an `FfiGroupList`.
    pub(crate) fn ok_groups(groups: Vec<Group>) -> *mut Self {
        let groups: Vec<FfiGroup> = groups
            .into_iter()
            .map(|g| FfiGroup {
                id: c_string(g.id),
                title: c_string(g.title),
            })
            .collect();
        let (items, len) = into_raw_parts(groups);
        let list = Box::new(FfiGroupList { items, len });
        Self::ok(FfiDataTag::GroupList, Box::into_raw(list).cast())
    }

    /// Build a success result carrying an `FfiColumnList`.
    pub(crate) fn ok_columns(columns: Vec<Column>) -> *mut Self {
        let columns: Vec<FfiColumn> = columns
            .into_iter()
            .map(|c| FfiColumn {
                id: c_string(c.id),
                title: c_string(c.title),
                column_type: c_string(c.column_type),
                settings: c_string(c.settings),
            })
            .collect();
        let (items, len) = into_raw_parts(columns);
        let list = Box::new(FfiColumnList { items, len });
        Self::ok(FfiDataTag::ColumnList, Box::into_raw(list).cast())
    }

    /// Build a success result carrying an `FfiItemList`.
    pub(crate) fn ok_items(items: Vec<Item>) -> *mut Self {
        let items: Vec<FfiItem> = items.into_iter().map(ffi_item).collect();
        let (items, len) = into_raw_parts(items);
        let list = Box::new(FfiItemList { items, len });
        Self::ok(FfiDataTag::ItemList, Box::into_raw(list).cast())
    }

    /// Build a success result carrying an `FfiId`.
    pub(crate) fn ok_id(id: String) -> *mut Self {
        let id = Box::new(FfiId { id: c_string(id) });
        Self::ok(FfiDataTag::Id, Box::into_raw(id).cast())
    }

    /// Build a success result carrying an `FfiDecodedValue`.
    pub(crate) fn ok_decoded(decoded: DecodedValue) -> *mut Self {
        let value = match decoded {
            DecodedValue::Empty => FfiDecodedValue {
                tag: FfiDecodedTag::Empty,
                single: std::ptr::null_mut(),
                values: std::ptr::null_mut(),
                values_len: 0,
            },
            DecodedValue::Single(s) => FfiDecodedValue {
                tag: FfiDecodedTag::Single,
                single: c_string(s),
                values: std::ptr::null_mut(),
                values_len: 0,
            },
            DecodedValue::Multiple(strings) => {
                let strings: Vec<*mut c_char> = strings.into_iter().map(c_string).collect();
                let (values, values_len) = into_raw_parts(strings);
                FfiDecodedValue {
                    tag: FfiDecodedTag::Multiple,
                    single: std::ptr::null_mut(),
                    values,
                    values_len,
                }
            }
        };
        Self::ok(FfiDataTag::DecodedValue, Box::into_raw(Box::new(value)).cast())
    }

    /// Build an error result from an `ApiError`.
    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let (error_code, http_status) = match &err {
            ApiError::Http { status, .. } => (FfiErrorCode::Http, *status),
            ApiError::Graphql { .. } => (FfiErrorCode::Graphql, 0),
            ApiError::MissingData => (FfiErrorCode::MissingData, 0),
            ApiError::BoardNotFound => (FfiErrorCode::BoardNotFound, 0),
            ApiError::Serialization(_) => (FfiErrorCode::Serialization, 0),
            ApiError::Deserialization(_) => (FfiErrorCode::Deserialization, 0),
            ApiError::UnknownColumnId(_) => (FfiErrorCode::UnknownColumnId, 0),
            ApiError::UnsupportedColumnType(_) => (FfiErrorCode::UnsupportedColumnType, 0),
            ApiError::InvalidItemId(_) => (FfiErrorCode::InvalidItemId, 0),
            ApiError::Config(_) => (FfiErrorCode::Config, 0),
        };

        Box::into_raw(Box::new(FfiMondayResult {
            error_code,
            error_message: c_string(err.to_string()),
            http_status,
            data_tag: FfiDataTag::None,
            data: std::ptr::null_mut(),
        }))
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Box::into_raw(Box::new(FfiMondayResult {
            error_code: FfiErrorCode::NullArg,
            error_message: c_string(format!("null argument: {name}")),
            http_status: 0,
            data_tag: FfiDataTag::None,
            data: std::ptr::null_mut(),
        }))
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Box::into_raw(Box::new(FfiMondayResult {
            error_code: FfiErrorCode::Panic,
            error_message: c_string(msg.to_string()),
            http_status: 0,
            data_tag: FfiDataTag::None,
            data: std::ptr::null_mut(),
        }))
    }
}

fn ffi_item(item: Item) -> FfiItem {
    let values: Vec<FfiColumnValue> = item
        .column_values
        .into_iter()
        .map(|v| FfiColumnValue {
            id: c_string(v.id),
            value: match v.value {
                Some(raw) => c_string(raw),
                None => std::ptr::null_mut(),
            },
        })
        .collect();
    let (column_values, column_values_len) = into_raw_parts(values);
    FfiItem {
        id: c_string(item.id),
        group_id: c_string(item.group_id),
        name: c_string(item.name),
        column_values,
        column_values_len,
    }
}

/// Rebuild core `ColumnValue` input from caller-provided C data.
pub(crate) fn column_value_from_ffi(id: &str, value: Option<String>) -> ColumnValue {
    ColumnValue {
        id: id.to_string(),
        value,
    }
}
