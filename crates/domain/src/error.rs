// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors raised while validating user-supplied filter input.
///
/// Messages are user-facing (Portuguese) and are meant to be surfaced as a
/// form-level error by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A value could not be coerced to a base-10 integer.
    NotAnInteger {
        /// The field being validated.
        field: String,
        /// The raw value as received.
        value: String,
    },
    /// An integer fell outside of its permitted bounds.
    OutOfRange {
        /// The field being validated.
        field: String,
        /// The coerced value.
        value: i64,
        /// Inclusive lower bound.
        min: i64,
        /// Inclusive upper bound.
        max: i64,
    },
    /// A required string was empty after trimming.
    EmptyValue {
        /// The field being validated.
        field: String,
    },
    /// A string exceeded its maximum length in characters.
    TooLong {
        /// The field being validated.
        field: String,
        /// The maximum permitted length.
        max_length: usize,
    },
    /// A value had a JSON type the field does not accept.
    UnexpectedType {
        /// The field being validated.
        field: String,
    },
    /// The year is not within 2000..=2100.
    InvalidYear,
    /// The ISO week number is not within 1..=53.
    InvalidWeek,
    /// A date was not `YYYY-MM-DD` or not a real calendar date.
    InvalidDate {
        /// The field being validated.
        field: String,
        /// The raw value as received.
        value: String,
    },
    /// A date lies after today.
    DateInFuture {
        /// The field being validated.
        field: String,
    },
    /// A date lies before the earliest date with data.
    DateTooEarly {
        /// The field being validated.
        field: String,
    },
    /// The end of a date range precedes its start.
    DateRangeInverted,
    /// A facet list has more entries than permitted.
    TooManyItems {
        /// The plural label of the facet (e.g. "praças").
        label: String,
        /// The maximum number of entries.
        max: usize,
    },
    /// A facet entry is empty or longer than permitted.
    InvalidItemLength {
        /// The field being validated.
        field: String,
        /// The maximum permitted length.
        max_length: usize,
    },
    /// A facet entry contains characters outside of the allow-list.
    InvalidCharacters {
        /// The field being validated.
        field: String,
    },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnInteger { field, value } => {
                write!(f, "{field} deve ser um número inteiro (recebido '{value}')")
            }
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{field} deve estar entre {min} e {max} (recebido {value})"),
            Self::EmptyValue { field } => write!(f, "{field} não pode ser vazio"),
            Self::TooLong { field, max_length } => {
                write!(f, "{field} deve ter no máximo {max_length} caracteres")
            }
            Self::UnexpectedType { field } => write!(f, "{field} possui um tipo inválido"),
            Self::InvalidYear => write!(f, "Ano inválido"),
            Self::InvalidWeek => write!(f, "Semana inválida"),
            Self::InvalidDate { field, value } => {
                write!(f, "{field} inválida: '{value}' (use o formato AAAA-MM-DD)")
            }
            Self::DateInFuture { field } => write!(f, "{field} não pode ser uma data futura"),
            Self::DateTooEarly { field } => {
                write!(f, "{field} não pode ser anterior a 2020-01-01")
            }
            Self::DateRangeInverted => {
                write!(f, "Data final deve ser maior ou igual à data inicial")
            }
            Self::TooManyItems { label, max } => write!(f, "Máximo de {max} {label} permitidos"),
            Self::InvalidItemLength { field, max_length } => {
                write!(f, "{field} deve ter entre 1 e {max_length} caracteres")
            }
            Self::InvalidCharacters { field } => write!(f, "{field} contém caracteres inválidos"),
        }
    }
}

impl std::error::Error for ValidationError {}
