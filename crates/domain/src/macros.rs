/// ストア採番（BIGSERIAL）の ID 型を定義する宣言型マクロ
///
/// 以下のボイラープレートを一括生成する:
/// - Newtype 構造体（`i64` をラップ、JSON では数値としてそのまま出力）
/// - `derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)`
/// - `from_i64()`: 既存の値から復元
/// - `as_i64()`: 内部の値を取得
/// - `parse()`: パスパラメータなどの文字列から解釈
///
/// # 使用例
///
/// ```rust
/// use clinic_domain::patient::PatientId;
///
/// let id = PatientId::parse("42").unwrap();
/// assert_eq!(id.as_i64(), 42);
/// assert_eq!(PatientId::parse("abc"), None);
/// ```
macro_rules! define_serial_id {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
            derive_more::Display,
        )]
        #[serde(transparent)]
        #[display("{_0}")]
        $vis struct $Name(i64);

        impl $Name {
            /// 既存の値から ID を作成する
            pub fn from_i64(value: i64) -> Self {
                Self(value)
            }

            /// 内部の値を取得する
            pub fn as_i64(&self) -> i64 {
                self.0
            }

            /// 文字列から ID を解釈する
            ///
            /// 数値として解釈できない場合は `None`。
            /// そのような ID に一致する行は存在し得ない。
            pub fn parse(value: &str) -> Option<Self> {
                value.trim().parse::<i64>().ok().map(Self)
            }
        }
    };
}
