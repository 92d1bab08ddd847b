#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct ServerVersion {
    #[serde(rename = "version")]
    pub version: String,
}
