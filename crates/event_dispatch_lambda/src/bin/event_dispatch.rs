use chrono::Utc;
use event_dispatch_lambda::adapters::log::{install_json_subscriber, EventLog, TracingEventLog};
use event_dispatch_lambda::adapters::notify::Notifier;
use event_dispatch_lambda::adapters::secrets::SecretStore;
use event_dispatch_lambda::handlers::dispatch::{handle_event, DispatchDeps};
use event_dispatch_lambda::runtime::config::HandlerConfig;
use event_dispatch_lambda::runtime::context::InvocationContext;
use event_dispatch_lambda::runtime::contract::DispatchOutcome;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::{json, Value};

struct SecretsManagerStore {
    client: aws_sdk_secretsmanager::Client,
}

impl SecretStore for SecretsManagerStore {
    fn get_secret_string(&self, secret_name: &str) -> Result<String, String> {
        let client = self.client.clone();
        let secret_id = secret_name.to_string();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let output = client
                    .get_secret_value()
                    .secret_id(secret_id)
                    .send()
                    .await
                    .map_err(|error| {
                        format!("failed to read secret from secrets manager: {error}")
                    })?;
                output
                    .secret_string()
                    .map(str::to_string)
                    .ok_or_else(|| "secret has no string value".to_string())
            })
        })
    }
}

struct SnsNotifier {
    client: aws_sdk_sns::Client,
}

impl Notifier for SnsNotifier {
    fn publish(&self, topic_arn: &str, subject: &str, message: &str) -> Result<(), String> {
        let client = self.client.clone();
        let topic_arn = topic_arn.to_string();
        let subject = subject.to_string();
        let message = message.to_string();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .publish()
                    .topic_arn(topic_arn)
                    .subject(subject)
                    .message(message)
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to publish sns notification: {error}"))
            })
        })
    }
}

struct RuntimeDependencies {
    config: HandlerConfig,
    log: TracingEventLog,
    secrets: SecretsManagerStore,
    notifier: SnsNotifier,
}

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: &RuntimeDependencies,
) -> Result<DispatchOutcome, Error> {
    let (payload, lambda_context) = event.into_parts();
    let context = InvocationContext::new(
        lambda_context.request_id,
        lambda_context.env_config.function_name.clone(),
        Utc::now(),
    );

    let dispatch_deps = DispatchDeps {
        config: &deps.config,
        log: &deps.log,
        secrets: &deps.secrets,
        notifier: &deps.notifier,
    };

    Ok(handle_event(&payload, &context, &dispatch_deps))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = HandlerConfig::from_env()?;
    install_json_subscriber(config.log_level);

    let log = TracingEventLog::new("event_dispatch");
    log.info(
        "handler_configured",
        json!({
            "stage": config.stage.clone(),
            "log_level": config.log_level.as_str(),
            "api_base_url": config.api_base_url.clone(),
            "notification_topic_configured": config.notification_topic_arn.is_some(),
        }),
    );

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let deps = RuntimeDependencies {
        config,
        log,
        secrets: SecretsManagerStore {
            client: aws_sdk_secretsmanager::Client::new(&aws_config),
        },
        notifier: SnsNotifier {
            client: aws_sdk_sns::Client::new(&aws_config),
        },
    };
    let deps = &deps;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_request(event, deps).await
    }))
    .await
}
