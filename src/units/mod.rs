//! 면적·길이 단위 정의 및 변환, cfs→gpm 환산 상수.
//! 내부 계산은 미국식 관례(ft², ft, cfs)를 기준으로 한다.

pub mod area;
pub mod flow;
pub mod length;

pub use area::{convert_area, AreaUnit, SQFT_PER_ACRE};
pub use flow::GPM_PER_CFS;
pub use length::{convert_length, LengthUnit};
