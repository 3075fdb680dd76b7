/// 1 cfs(ft³/s)에 해당하는 US gpm. 보고서의 gpm 표기는 이 값만 쓴다.
pub const GPM_PER_CFS: f64 = 448.831;
