// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Parameter names of the backend filter contract.
//!
//! These names are part of the RPC contract and must match exactly.

pub const YEAR: &str = "p_ano";
pub const WEEK: &str = "p_semana";
pub const WEEKS: &str = "p_semanas";
pub const VENUE: &str = "p_praca";
pub const SUB_VENUE: &str = "p_sub_praca";
pub const ORIGIN: &str = "p_origem";
pub const SHIFT: &str = "p_turno";
pub const SUB_VENUES: &str = "p_sub_pracas";
pub const ORIGINS: &str = "p_origens";
pub const SHIFTS: &str = "p_turnos";
pub const FILTER_MODE: &str = "p_filtro_modo";
pub const DATE_START: &str = "p_data_inicial";
pub const DATE_END: &str = "p_data_final";
pub const ORGANIZATION_ID: &str = "p_organization_id";
/// Row limit accepted by listing functions.
pub const LIMIT: &str = "p_limite";
