//! Notary - runtime type-signature contracts for dynamically-typed values
//!
//! A signature such as `Ord a => [a] -> a` is parsed once and then used to
//! check the arguments and result of every call to the function it guards.

pub mod ast;
pub mod check;
pub mod config;
pub mod errors;
pub mod infer;
pub mod lexer;
pub mod parser;
pub mod sign;
pub mod test_support;
pub mod types;
pub mod value;

pub use ast::{LocatedSpan, Position, SourceMap, Span};
pub use check::{check_signature, Checker, ContractError};
pub use config::{ArrayPolicy, CheckConfig};
pub use errors::{
    find_similar, format_contract_error, format_signature_error, levenshtein_distance, Colors,
    ErrorConfig,
};
pub use infer::{infer_type, Inferencer};
pub use parser::{parse_signature, SignatureError};
pub use sign::{sign, sign_with_config, Notary, Signed};
pub use types::{compare_types, BaseType, Class, ClassEnv, ClassError, Primitive, Signature, Type};
pub use value::{Function, Value};
