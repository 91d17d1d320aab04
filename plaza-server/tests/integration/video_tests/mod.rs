mod test_new_user_on_join;
mod test_signaling_relay;
