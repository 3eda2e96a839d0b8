use serde::{Deserialize, Serialize};

/// Separator the gateway expects between the template id and its parameters.
const TEMPLATE_PARAM_SEPARATOR: &str = "~";

pub const MESSAGE_ENDPOINT: &str = "/psms/servlet/psms.JsonEservice";

/// Fixed-shape payload of the message-send endpoint. Field names and the
/// protocol flag values are literal requirements of the gateway; built fresh
/// per call and discarded after.
#[derive(Debug, Serialize)]
pub struct MessageEnvelope {
    #[serde(rename = "@VER")]
    version: &'static str,
    #[serde(rename = "USER")]
    user: EnvelopeUser,
    #[serde(rename = "DLR")]
    dlr: EnvelopeDlr,
    #[serde(rename = "SMS")]
    sms: Vec<EnvelopeSms>,
}

#[derive(Debug, Serialize)]
struct EnvelopeUser {
    #[serde(rename = "@USERNAME")]
    username: String,
    #[serde(rename = "@PASSWORD")]
    password: String,
    #[serde(rename = "@CH_TYPE")]
    channel_type: &'static str,
    #[serde(rename = "@UNIXTIMESTAMP")]
    unix_timestamp: &'static str,
}

#[derive(Debug, Serialize)]
struct EnvelopeDlr {
    #[serde(rename = "@URL")]
    url: &'static str,
}

#[derive(Debug, Serialize)]
struct EnvelopeSms {
    #[serde(rename = "@UDH")]
    udh: &'static str,
    #[serde(rename = "@CODING")]
    coding: &'static str,
    #[serde(rename = "@TEXT")]
    text: &'static str,
    #[serde(rename = "@TEMPLATEINFO")]
    template_info: String,
    #[serde(rename = "@CONTENTTYPE")]
    content_type: &'static str,
    #[serde(rename = "@TYPE")]
    kind: &'static str,
    #[serde(rename = "@MSGTYPE")]
    msg_type: &'static str,
    #[serde(rename = "@MEDIADATA")]
    media_data: &'static str,
    #[serde(rename = "@B_URLINFO")]
    button_url_info: &'static str,
    #[serde(rename = "@PROPERTY")]
    property: &'static str,
    #[serde(rename = "@ID")]
    id: &'static str,
    #[serde(rename = "ADDRESS")]
    address: Vec<EnvelopeAddress>,
}

#[derive(Debug, Serialize)]
struct EnvelopeAddress {
    #[serde(rename = "@FROM")]
    from: String,
    #[serde(rename = "@TO")]
    to: String,
    #[serde(rename = "@SEQ")]
    seq: &'static str,
    #[serde(rename = "@TAG")]
    tag: &'static str,
}

impl MessageEnvelope {
    pub fn new(
        username: &str,
        token: &str,
        business_number: &str,
        recipient: &str,
        template_info: &str,
    ) -> Self {
        Self {
            version: "1.2",
            user: EnvelopeUser {
                username: username.to_string(),
                password: token.to_string(),
                channel_type: "4",
                unix_timestamp: "",
            },
            dlr: EnvelopeDlr { url: "" },
            sms: vec![EnvelopeSms {
                udh: "0",
                coding: "1",
                text: "",
                template_info: template_info.to_string(),
                content_type: "",
                kind: "",
                msg_type: "1",
                media_data: "",
                button_url_info: "",
                property: "0",
                id: "",
                address: vec![EnvelopeAddress {
                    from: business_number.to_string(),
                    to: recipient.to_string(),
                    seq: "1",
                    tag: "",
                }],
            }],
        }
    }
}

/// Template id plus each parameter appended with the gateway separator.
pub fn compose_template_info(template_id: &str, parameters: &[String]) -> String {
    if parameters.is_empty() {
        return template_id.to_string();
    }
    let mut composed = template_id.to_string();
    for parameter in parameters {
        composed.push_str(TEMPLATE_PARAM_SEPARATOR);
        composed.push_str(parameter);
    }
    composed
}

/// ================================
/// Acknowledgment
/// ================================
#[derive(Debug, Deserialize)]
pub struct SendResponse {
    #[serde(rename = "MESSAGEACK")]
    pub message_ack: Option<MessageAck>,
}

#[derive(Debug, Deserialize)]
pub struct MessageAck {
    #[serde(rename = "GUID")]
    pub guid: Option<AckGuid>,
}

#[derive(Debug, Deserialize)]
pub struct AckGuid {
    #[serde(rename = "GUID")]
    pub id: Option<String>,
    #[serde(rename = "ERROR")]
    pub error: Option<AckError>,
}

#[derive(Debug, Deserialize)]
pub struct AckError {
    #[serde(rename = "CODE")]
    pub code: i64,
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn template_info_composition() {
        assert_eq!(compose_template_info("tpl1", &[]), "tpl1");
        assert_eq!(
            compose_template_info("tpl1", &["x".to_string(), "y".to_string()]),
            "tpl1~x~y"
        );
    }

    #[test]
    fn envelope_serializes_with_literal_field_names() {
        let envelope = MessageEnvelope::new("acme", "tok-1", "2348000000000", "2348012345678", "tpl1~x~y");
        let value = serde_json::to_value(&envelope).expect("serialize");

        assert_eq!(value["@VER"], "1.2");
        assert_eq!(value["USER"]["@USERNAME"], "acme");
        assert_eq!(value["USER"]["@PASSWORD"], "tok-1");
        assert_eq!(value["USER"]["@CH_TYPE"], "4");
        assert_eq!(value["USER"]["@UNIXTIMESTAMP"], "");
        assert_eq!(value["DLR"]["@URL"], "");

        let sms = value["SMS"].as_array().expect("SMS array");
        assert_eq!(sms.len(), 1);
        assert_eq!(sms[0]["@TEMPLATEINFO"], "tpl1~x~y");
        assert_eq!(sms[0]["@MSGTYPE"], "1");
        assert_eq!(sms[0]["@PROPERTY"], "0");

        let address = sms[0]["ADDRESS"].as_array().expect("ADDRESS array");
        assert_eq!(address.len(), 1);
        assert_eq!(address[0]["@FROM"], "2348000000000");
        assert_eq!(address[0]["@TO"], "2348012345678");
        assert_eq!(address[0]["@SEQ"], "1");
    }

    #[test]
    fn acknowledgment_error_code_parses() {
        let value = json!({"MESSAGEACK": {"GUID": {"ERROR": {"CODE": 17}}}});
        let response: SendResponse = serde_json::from_value(value).expect("parse ack");
        let guid = response.message_ack.and_then(|ack| ack.guid).expect("guid");
        assert_eq!(guid.error.map(|e| e.code), Some(17));
    }

    #[test]
    fn acknowledgment_without_ack_path_yields_none() {
        let value = json!({"unexpected": true});
        let response: SendResponse = serde_json::from_value(value).expect("parse");
        assert!(response.message_ack.is_none());
    }
}
